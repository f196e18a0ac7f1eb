//! In-app purchase assembly
//!
//! Lists every in-app purchase of the app, resolves the currently effective
//! price and the localizations for each, and projects them into output
//! [`Product`] records.

use super::{attr_bool, attr_opt_str, attr_str, convert, pricing, record_id};
use crate::asc::client::AscClient;
use crate::storekit::{Localization, Product};
use anyhow::Result;

/// Load every in-app purchase of the app as an output product
///
/// Products keep the server response order. Each purchase is processed
/// sequentially: price first, then localizations.
pub async fn load_products(client: &AscClient, app_id: &str) -> Result<Vec<Product>> {
    let list = client
        .read_all(&format!("v1/apps/{}/inAppPurchasesV2", app_id), &[])
        .await?;

    tracing::info!("Fetched {} in-app purchases", list.data.len());

    let mut products = Vec::new();

    for purchase in &list.data {
        let id = record_id(purchase, "inAppPurchase")?;

        let price_point = pricing::resolve_current_price_point(
            client,
            &format!("v1/inAppPurchasePriceSchedules/{}/manualPrices", id),
            "inAppPurchasePricePoint",
        )
        .await?;
        let display_price = attr_str(&price_point, "inAppPurchasePricePoint", "customerPrice")?;

        let localizations = fetch_localizations(client, &id).await?;

        let raw_type = attr_str(purchase, "inAppPurchase", "inAppPurchaseType")?;

        products.push(Product {
            display_price,
            family_shareable: attr_bool(purchase, "inAppPurchase", "familySharable")?,
            internal_id: id,
            localizations,
            product_id: attr_str(purchase, "inAppPurchase", "productId")?,
            reference_name: attr_str(purchase, "inAppPurchase", "name")?,
            product_type: convert::product_type(&raw_type).to_string(),
        });

        tracing::debug!("Processed {} of {}", products.len(), list.data.len());
    }

    Ok(products)
}

/// Fetch the localizations of one in-app purchase
async fn fetch_localizations(client: &AscClient, purchase_id: &str) -> Result<Vec<Localization>> {
    let list = client
        .read_all(
            &format!("v2/inAppPurchases/{}/inAppPurchaseLocalizations", purchase_id),
            &[("fields[inAppPurchaseLocalizations]", "name,description,locale")],
        )
        .await?;

    list.data
        .iter()
        .map(|localization| {
            Ok(Localization {
                description: attr_opt_str(localization, "description"),
                display_name: attr_str(localization, "inAppPurchaseLocalization", "name")?,
                locale: attr_str(localization, "inAppPurchaseLocalization", "locale")?,
            })
        })
        .collect()
}
