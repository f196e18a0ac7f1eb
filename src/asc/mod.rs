//! App Store Connect API interaction module
//!
//! This module provides the core functionality for talking to the App Store
//! Connect REST API: ES256 token-based authentication, a thin HTTP layer,
//! and a client with link-following pagination.
//!
//! # Module Structure
//!
//! - [`auth`] - API key credentials and signed bearer-token minting
//! - [`client`] - Main client with URL builders and the `read_all` aggregator
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use skgen::asc::auth::AscCredentials;
//! use skgen::asc::client::AscClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let credentials = AscCredentials::new("issuer", "KEYID", pem)?;
//!     let client = AscClient::new(credentials)?;
//!     let purchases = client.read_all("v1/apps/123/inAppPurchasesV2", &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
