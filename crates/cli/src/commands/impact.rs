use anyhow::{anyhow, bail, Context, Result};
use neuroboutique_core::checkout::summarize;
use neuroboutique_core::domain::product::{Product, ProductId};
use neuroboutique_core::loyalty::LoyaltyTier;
use neuroboutique_core::scoring::CartLine;

use super::{with_demo_store, CommandResult};

/// Parses `PRODUCT_ID:QTY`. Quantities must be positive.
pub fn parse_line(raw: &str) -> Result<(ProductId, u32)> {
    let (id, quantity) =
        raw.split_once(':').ok_or_else(|| anyhow!("expected PRODUCT_ID:QTY, got `{raw}`"))?;
    let id = id.trim();
    if id.is_empty() {
        bail!("missing product id in `{raw}`");
    }
    let quantity: u32 =
        quantity.trim().parse().with_context(|| format!("invalid quantity in `{raw}`"))?;
    if quantity == 0 {
        bail!("quantity must be at least 1 in `{raw}`");
    }
    Ok((ProductId(id.to_string()), quantity))
}

pub fn run(raw_lines: &[String]) -> CommandResult {
    let requested = match raw_lines.iter().map(|raw| parse_line(raw)).collect::<Result<Vec<_>>>()
    {
        Ok(requested) => requested,
        Err(error) => {
            return CommandResult::failure("impact", "invalid_argument", format!("{error:#}"), 2);
        }
    };

    with_demo_store("impact", move |config, store| async move {
        let mut products: Vec<(Product, u32)> = Vec::with_capacity(requested.len());
        for (id, quantity) in requested {
            match store.products.find_by_id(&id).await {
                Ok(Some(product)) => products.push((product, quantity)),
                Ok(None) => {
                    return CommandResult::failure(
                        "impact",
                        "not_found",
                        format!("product `{id}` is not in the catalog"),
                        1,
                    );
                }
                Err(error) => {
                    return CommandResult::failure("impact", "store", error.to_string(), 1);
                }
            }
        }

        let lines: Vec<CartLine<'_>> =
            products.iter().map(|(product, quantity)| CartLine::new(product, *quantity)).collect();
        let summary =
            summarize(&lines, LoyaltyTier::Bronze, config.loyalty.points_per_dollar);
        let message = match summary.wellness_score {
            Some(score) => format!("predicted overall wellness +{score}%"),
            None => "cart priced".to_string(),
        };

        CommandResult::success_with_data("impact", message, summary)
    })
}
