//! StoreKit configuration document
//!
//! The output document model and the generator that assembles it from the
//! App Store Connect catalog and writes it to disk. Field order in the
//! structs matches the key order StoreKit configuration files use.

use crate::asc::client::AscClient;
use crate::catalog::{products, subscriptions};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

// Placeholder values carried until deriving them from the app record is
// wired up. TODO: read identifier/settings from v1/apps/{id} attributes.
const PLACEHOLDER_IDENTIFIER: &str = "800085FC";
const PLACEHOLDER_APPLICATION_INTERNAL_ID: &str = "448639966";
const PLACEHOLDER_DEVELOPER_TEAM_ID: &str = "F6J8Q2Y2Q9";
// Fixed so that repeat runs against an unchanged catalog are byte-identical
const PLACEHOLDER_LAST_SYNCHRONIZED_DATE: f64 = 697370746.613636;

const FORMAT_VERSION_MAJOR: u32 = 2;
const FORMAT_VERSION_MINOR: u32 = 0;

/// A customer-facing display name and description in one locale
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub description: Option<String>,
    pub display_name: String,
    pub locale: String,
}

/// A non-subscription product (consumable, non-consumable, ...)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub display_price: String,
    pub family_shareable: bool,
    #[serde(rename = "internalID")]
    pub internal_id: String,
    pub localizations: Vec<Localization>,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub reference_name: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

/// A time-limited discounted entry offer attached to a subscription
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroductoryOffer {
    #[serde(rename = "internalID")]
    pub internal_id: String,
    pub number_of_periods: i64,
    pub payment_mode: String,
    pub subscription_period: String,
}

/// An auto-renewable subscription within a group
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Ad-hoc offers are not synchronized; always empty
    pub ad_hoc_offers: Vec<Value>,
    /// Offer codes are not synchronized; always empty
    pub code_offers: Vec<Value>,
    pub display_price: String,
    pub family_shareable: bool,
    pub group_number: i64,
    #[serde(rename = "internalID")]
    pub internal_id: String,
    pub introductory_offer: Vec<IntroductoryOffer>,
    pub localizations: Vec<Localization>,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub recurring_subscription_period: String,
    pub reference_name: String,
    #[serde(rename = "subscriptionGroupID")]
    pub subscription_group_id: String,
    #[serde(rename = "type")]
    pub subscription_type: String,
}

/// A subscription group and its subscriptions, in server order
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionGroup {
    pub id: String,
    pub name: String,
    /// Group-level localizations are not synchronized; always empty
    pub localizations: Vec<Value>,
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    #[serde(rename = "_applicationInternalID")]
    pub application_internal_id: String,
    #[serde(rename = "_developerTeamID")]
    pub developer_team_id: String,
    #[serde(rename = "_lastSynchronizedDate")]
    pub last_synchronized_date: f64,
}

impl Settings {
    fn placeholder() -> Self {
        Self {
            application_internal_id: PLACEHOLDER_APPLICATION_INTERNAL_ID.to_string(),
            developer_team_id: PLACEHOLDER_DEVELOPER_TEAM_ID.to_string(),
            last_synchronized_date: PLACEHOLDER_LAST_SYNCHRONIZED_DATE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
}

/// The full StoreKit configuration document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreKitConfiguration {
    pub identifier: String,
    /// Non-renewing subscription sync is not supported; always empty
    pub non_renewing_subscriptions: Vec<Value>,
    pub products: Vec<Product>,
    pub settings: Settings,
    pub subscription_groups: Vec<SubscriptionGroup>,
    pub version: FormatVersion,
}

/// Assembles a [`StoreKitConfiguration`] from the catalog of one app
pub struct Generator {
    client: AscClient,
    app_id: String,
}

impl Generator {
    pub fn new(client: AscClient, app_id: &str) -> Self {
        Self {
            client,
            app_id: app_id.to_string(),
        }
    }

    /// Fetch the catalog and build the configuration document in memory
    ///
    /// Any fetch or data-integrity failure aborts here, before anything is
    /// written.
    pub async fn build(&self) -> Result<StoreKitConfiguration> {
        let products = products::load_products(&self.client, &self.app_id).await?;
        let subscription_groups =
            subscriptions::load_subscription_groups(&self.client, &self.app_id).await?;

        Ok(StoreKitConfiguration {
            identifier: PLACEHOLDER_IDENTIFIER.to_string(),
            non_renewing_subscriptions: Vec::new(),
            products,
            settings: Settings::placeholder(),
            subscription_groups,
            version: FormatVersion {
                major: FORMAT_VERSION_MAJOR,
                minor: FORMAT_VERSION_MINOR,
            },
        })
    }

    /// Generate the configuration file at `output`
    ///
    /// A failure writing the finished document is logged but does not fail
    /// the run; fetch failures before that point do.
    pub async fn generate(&self, output: &Path) -> Result<()> {
        let document = self.build().await?;

        let json = serde_json::to_string_pretty(&document)
            .context("Failed to serialize configuration")?;

        match std::fs::write(output, json) {
            Ok(()) => tracing::info!("Configuration written to {}", output.display()),
            Err(err) => {
                tracing::error!("Failed to write configuration to {}: {}", output.display(), err)
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_document() -> StoreKitConfiguration {
        StoreKitConfiguration {
            identifier: PLACEHOLDER_IDENTIFIER.to_string(),
            non_renewing_subscriptions: Vec::new(),
            products: Vec::new(),
            settings: Settings::placeholder(),
            subscription_groups: Vec::new(),
            version: FormatVersion {
                major: FORMAT_VERSION_MAJOR,
                minor: FORMAT_VERSION_MINOR,
            },
        }
    }

    #[test]
    fn test_empty_document_keeps_constant_fields() {
        let json: Value =
            serde_json::from_str(&serde_json::to_string_pretty(&empty_document()).unwrap())
                .unwrap();

        assert_eq!(json["identifier"], "800085FC");
        assert_eq!(json["nonRenewingSubscriptions"], serde_json::json!([]));
        assert_eq!(json["products"], serde_json::json!([]));
        assert_eq!(json["subscriptionGroups"], serde_json::json!([]));
        assert_eq!(json["settings"]["_applicationInternalID"], "448639966");
        assert_eq!(json["settings"]["_developerTeamID"], "F6J8Q2Y2Q9");
        assert_eq!(json["version"]["major"], 2);
        assert_eq!(json["version"]["minor"], 0);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let first = serde_json::to_string_pretty(&empty_document()).unwrap();
        let second = serde_json::to_string_pretty(&empty_document()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_key_order() {
        let json = serde_json::to_string(&empty_document()).unwrap();

        let identifier = json.find("\"identifier\"").unwrap();
        let non_renewing = json.find("\"nonRenewingSubscriptions\"").unwrap();
        let products = json.find("\"products\"").unwrap();
        let settings = json.find("\"settings\"").unwrap();
        let groups = json.find("\"subscriptionGroups\"").unwrap();
        let version = json.find("\"version\"").unwrap();

        assert!(identifier < non_renewing);
        assert!(non_renewing < products);
        assert!(products < settings);
        assert!(settings < groups);
        assert!(groups < version);
    }
}
