//! HTTP utilities for App Store Connect REST API calls

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} bytes total]", &body[..MAX_LOG_BODY_LENGTH], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for App Store Connect API calls
#[derive(Clone)]
pub struct AscHttpClient {
    client: Client,
}

impl AscHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("skgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make an authenticated GET request and parse the JSON response
    pub async fn get(&self, url: &str, query: &[(&str, &str)], token: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

impl Default for AscHttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

/// Format an App Store Connect API error for display
/// Sanitizes error messages to avoid leaking API details
pub fn format_asc_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    if error_str.contains("403") {
        return "Permission denied. Check the roles granted to your API key.".to_string();
    }
    if error_str.contains("401") {
        return "Authentication failed. Check your issuer id, key id, and private key.".to_string();
    }
    if error_str.contains("404") {
        return "Resource not found. Check the app id.".to_string();
    }
    if error_str.contains("429") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if error_str.contains("400") {
        return "Invalid request. Check your parameters.".to_string();
    }
    if error_str.contains("500") || error_str.contains("503") {
        return "App Store Connect temporarily unavailable. Please try again.".to_string();
    }

    if error_str.contains("API request failed") {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    // Truncate long error messages and remove potential sensitive data
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 500 bytes total"));
    }

    #[test]
    fn test_format_known_statuses() {
        let err = anyhow::anyhow!("API request failed: 401 Unauthorized");
        assert!(format_asc_error(&err).contains("Authentication failed"));

        let err = anyhow::anyhow!("API request failed: 429 Too Many Requests");
        assert!(format_asc_error(&err).contains("Rate limit"));
    }
}
