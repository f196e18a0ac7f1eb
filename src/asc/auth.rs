//! App Store Connect Authentication
//!
//! Handles authentication against the App Store Connect API using an API key
//! (issuer id, key id, and an EC private key in PEM form). Tokens are ES256
//! JWTs signed locally and cached until shortly before expiry.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Audience claim required by the App Store Connect API
const TOKEN_AUDIENCE: &str = "appstoreconnect-v1";

/// Token lifetime in minutes (the API rejects tokens valid for more than 20)
const TOKEN_LIFETIME_MINUTES: i64 = 20;

/// Token expiry buffer - mint a new token this much before the old one expires
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER_MINUTES: i64 = 1;

/// JWT claims for the App Store Connect API
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    iat: i64,
    exp: i64,
    aud: String,
}

/// App Store Connect credentials holder with token caching
#[derive(Clone)]
pub struct AscCredentials {
    issuer_id: String,
    key_id: String,
    encoding_key: EncodingKey,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Check if this cached token is still valid
    fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

impl AscCredentials {
    /// Create new credentials from an API key
    ///
    /// `private_key` is the EC P-256 private key issued alongside the key id,
    /// in PEM form (SEC1 or PKCS#8).
    pub fn new(issuer_id: &str, key_id: &str, private_key: &str) -> Result<Self> {
        let encoding_key = EncodingKey::from_ec_pem(private_key.as_bytes())
            .context("Invalid App Store Connect private key (expected EC PEM)")?;

        Ok(Self {
            issuer_id: issuer_id.to_string(),
            key_id: key_id.to_string(),
            encoding_key,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get a bearer token for API calls
    ///
    /// Returns the cached token when it has not expired yet, otherwise signs
    /// a fresh one.
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, signing new token");
            }
        }

        let now = Utc::now();
        let exp = now + Duration::minutes(TOKEN_LIFETIME_MINUTES);

        let claims = Claims {
            iss: self.issuer_id.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            aud: TOKEN_AUDIENCE.to_string(),
        };

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());

        let token = encode(&header, &claims, &self.encoding_key)
            .context("Failed to sign App Store Connect token")?;

        let expires_at = exp - Duration::minutes(TOKEN_EXPIRY_BUFFER_MINUTES);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            TOKEN_LIFETIME_MINUTES - TOKEN_EXPIRY_BUFFER_MINUTES
        );

        Ok(token)
    }
}
