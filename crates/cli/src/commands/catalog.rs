use chrono::Utc;
use neuroboutique_core::domain::product::Product;
use neuroboutique_core::offers::{BundleListing, OfferListing};
use neuroboutique_db::RepositoryError;
use serde::Serialize;

use super::{with_demo_store, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogListing {
    products: Vec<Product>,
    bundles: Vec<BundleListing>,
    flash_deals: Vec<OfferListing>,
}

pub fn run() -> CommandResult {
    with_demo_store("catalog", |_config, store| async move {
        let now = Utc::now();
        let listing = async {
            let bundles = store.bundles.list_active().await?;
            let flash_deals = store.offers.list_flash_deals(now).await?;
            Ok::<_, RepositoryError>(CatalogListing {
                products: store.products.list().await?,
                bundles: bundles.into_iter().map(BundleListing::from).collect(),
                flash_deals: flash_deals
                    .into_iter()
                    .map(|offer| OfferListing::at(offer, now))
                    .collect(),
            })
        }
        .await;

        match listing {
            Ok(listing) => {
                let message = format!(
                    "{} products, {} bundles, {} flash deals",
                    listing.products.len(),
                    listing.bundles.len(),
                    listing.flash_deals.len()
                );
                CommandResult::success_with_data("catalog", message, listing)
            }
            Err(error) => CommandResult::failure("catalog", "store", error.to_string(), 1),
        }
    })
}
