//! Subscription group and subscription assembly
//!
//! Lists the app's subscription groups and, per group, its subscriptions.
//! Each subscription's price, introductory offers, and localizations are
//! fetched sequentially before the next subscription starts, so the output
//! follows server response order throughout.

use super::{attr_bool, attr_i64, attr_opt_str, attr_str, convert, pricing, record_id, TERRITORY};
use crate::asc::client::AscClient;
use crate::storekit::{IntroductoryOffer, Localization, Subscription, SubscriptionGroup};
use anyhow::Result;

/// Only auto-renewable subscriptions are synchronized
const SUBSCRIPTION_TYPE: &str = "RecurringSubscription";

/// Load every subscription group of the app, with its subscriptions
pub async fn load_subscription_groups(
    client: &AscClient,
    app_id: &str,
) -> Result<Vec<SubscriptionGroup>> {
    let list = client
        .read_all(&format!("v1/apps/{}/subscriptionGroups", app_id), &[])
        .await?;

    tracing::info!("Fetched {} subscription groups", list.data.len());

    let mut groups = Vec::new();

    for group in &list.data {
        let group_id = record_id(group, "subscriptionGroup")?;
        let name = attr_str(group, "subscriptionGroup", "referenceName")?;
        let subscriptions = fetch_subscriptions(client, &group_id).await?;

        groups.push(SubscriptionGroup {
            id: group_id,
            name,
            localizations: Vec::new(),
            subscriptions,
        });
    }

    Ok(groups)
}

/// Fetch and assemble the subscriptions of one group
async fn fetch_subscriptions(client: &AscClient, group_id: &str) -> Result<Vec<Subscription>> {
    let list = client
        .read_all(&format!("v1/subscriptionGroups/{}/subscriptions", group_id), &[])
        .await?;

    tracing::info!(
        "Fetched {} subscriptions for subscription group {}",
        list.data.len(),
        group_id
    );

    let mut subscriptions = Vec::new();

    for subscription in &list.data {
        let id = record_id(subscription, "subscription")?;

        let display_price = fetch_price(client, &id).await?;
        let introductory_offer = fetch_introductory_offers(client, &id).await?;
        let localizations = fetch_localizations(client, &id).await?;

        let raw_period = attr_str(subscription, "subscription", "subscriptionPeriod")?;

        subscriptions.push(Subscription {
            ad_hoc_offers: Vec::new(),
            code_offers: Vec::new(),
            display_price,
            family_shareable: attr_bool(subscription, "subscription", "familySharable")?,
            group_number: attr_i64(subscription, "subscription", "groupLevel")?,
            internal_id: id,
            introductory_offer,
            localizations,
            product_id: attr_str(subscription, "subscription", "productId")?,
            recurring_subscription_period: convert::subscription_period(&raw_period).to_string(),
            reference_name: attr_str(subscription, "subscription", "name")?,
            subscription_group_id: group_id.to_string(),
            subscription_type: SUBSCRIPTION_TYPE.to_string(),
        });
    }

    Ok(subscriptions)
}

/// Resolve the currently effective customer price of one subscription
async fn fetch_price(client: &AscClient, subscription_id: &str) -> Result<String> {
    tracing::debug!("Fetching price for subscription {}", subscription_id);

    let point = pricing::resolve_current_price_point(
        client,
        &format!("v1/subscriptions/{}/prices", subscription_id),
        "subscriptionPricePoint",
    )
    .await?;

    Ok(attr_str(&point, "subscriptionPricePoint", "customerPrice")?)
}

/// Fetch the introductory offers of one subscription
async fn fetch_introductory_offers(
    client: &AscClient,
    subscription_id: &str,
) -> Result<Vec<IntroductoryOffer>> {
    tracing::debug!("Fetching introductory offers for subscription {}", subscription_id);

    let list = client
        .read_all(
            &format!("v1/subscriptions/{}/introductoryOffers", subscription_id),
            &[("filter[territory]", TERRITORY)],
        )
        .await?;

    list.data
        .iter()
        .map(|offer| {
            let raw_mode = attr_str(offer, "subscriptionIntroductoryOffer", "offerMode")?;
            let raw_duration = attr_str(offer, "subscriptionIntroductoryOffer", "duration")?;

            Ok(IntroductoryOffer {
                internal_id: record_id(offer, "subscriptionIntroductoryOffer")?,
                number_of_periods: attr_i64(offer, "subscriptionIntroductoryOffer", "numberOfPeriods")?,
                payment_mode: convert::offer_payment_mode(&raw_mode).to_string(),
                subscription_period: convert::subscription_period(&raw_duration).to_string(),
            })
        })
        .collect()
}

/// Fetch the localizations of one subscription
async fn fetch_localizations(
    client: &AscClient,
    subscription_id: &str,
) -> Result<Vec<Localization>> {
    tracing::debug!("Fetching localizations for subscription {}", subscription_id);

    let list = client
        .read_all(
            &format!("v1/subscriptions/{}/subscriptionLocalizations", subscription_id),
            &[],
        )
        .await?;

    list.data
        .iter()
        .map(|localization| {
            Ok(Localization {
                description: attr_opt_str(localization, "description"),
                display_name: attr_str(localization, "subscriptionLocalization", "name")?,
                locale: attr_str(localization, "subscriptionLocalization", "locale")?,
            })
        })
        .collect()
}
