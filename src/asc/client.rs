//! App Store Connect Client
//!
//! Main client for the App Store Connect API, combining authentication and
//! HTTP functionality with link-following pagination.

use super::auth::AscCredentials;
use super::http::AscHttpClient;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Production API base URL
const API_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// All records of a paginated list resource, aggregated across pages
#[derive(Debug)]
pub struct ResourceList {
    /// Primary records in server order, concatenated page by page
    pub data: Vec<Value>,
    /// Side-loaded related records, keyed by resource id
    pub included: HashMap<String, Value>,
}

/// Main App Store Connect client
#[derive(Clone)]
pub struct AscClient {
    credentials: AscCredentials,
    http: AscHttpClient,
    base_url: String,
}

impl AscClient {
    /// Create a new client against the production API
    pub fn new(credentials: AscCredentials) -> Result<Self> {
        Self::with_base_url(credentials, API_BASE_URL)
    }

    /// Create a new client against a custom base URL (used by tests)
    pub fn with_base_url(credentials: AscCredentials, base_url: &str) -> Result<Self> {
        let http = AscHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the full URL for a versioned resource path like `v1/apps/123`
    fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make an authenticated GET request
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let token = self.credentials.get_token().await?;
        self.http.get(url, query, &token).await
    }

    /// Read every page of a list resource
    ///
    /// Follows `links.next` until exhausted, concatenating `data` in server
    /// order and merging `included` records into one table keyed by id.
    /// Colliding included ids across pages are assumed identical and the
    /// first occurrence wins. Errors from any page abort the whole read.
    pub async fn read_all(&self, path: &str, params: &[(&str, &str)]) -> Result<ResourceList> {
        let mut data = Vec::new();
        let mut included = HashMap::new();
        let mut next_url: Option<String> = None;

        loop {
            // Next links carry their own query string, so params only go on
            // the first request.
            let page = match next_url.as_deref() {
                Some(url) => self.get(url, &[]).await?,
                None => self.get(&self.resource_url(path), params).await?,
            };

            match page.get("data") {
                Some(Value::Array(items)) => data.extend(items.iter().cloned()),
                Some(item) if !item.is_null() => data.push(item.clone()),
                _ => {}
            }

            if let Some(items) = page.get("included").and_then(Value::as_array) {
                for item in items {
                    if let Some(id) = item.get("id").and_then(Value::as_str) {
                        included.entry(id.to_string()).or_insert_with(|| item.clone());
                    }
                }
            }

            next_url = page
                .get("links")
                .and_then(|links| links.get("next"))
                .and_then(Value::as_str)
                .map(String::from);

            if next_url.is_none() {
                break;
            }
        }

        Ok(ResourceList { data, included })
    }
}
