//! skgen - generate StoreKit configuration files from App Store Connect
//!
//! Fetches the product and subscription catalog of one app via the App Store
//! Connect REST API and reshapes it into a `.storekit` configuration
//! document.

pub mod asc;
pub mod catalog;
pub mod storekit;
