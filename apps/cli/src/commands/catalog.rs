//! # Catalog Commands
//!
//! Price list, stock and discount tiers.
//!
//! ```text
//! $ gorent vehicles
//! 🚗 Toyota Avanza (avanza, car)
//!    7-seat MPV, great for families
//!    Rp 350.000 / day, 5 of 5 available
//! ...
//!
//! $ gorent discounts --days 5
//! Gold Discount     7+ days  15%
//! Bronze Discount   3+ days  10%
//!
//! 5 day(s): Bronze Discount (10%) applies
//! Rent 2 more day(s) to get Gold Discount (15%)
//!
//! $ gorent restock
//! Stock restored for 4 vehicle(s)
//! ```

use serde::Serialize;
use tracing::{debug, info};

use gorent_core::discount::{next_tier, resolve_discount};
use gorent_core::{DiscountTier, Money, Vehicle};

use crate::error::CliResult;
use crate::state::{ConfigState, DbState};

/// A vehicle with its live stock level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListing {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub available: u32,
}

/// Lists every vehicle with price and remaining stock.
pub async fn list_vehicles(config: &ConfigState, db: &DbState, json: bool) -> CliResult<String> {
    debug!("vehicles command");

    let stock = db.inner().stock().load(&config.calculator).await?;
    let listings: Vec<VehicleListing> = config
        .calculator
        .vehicles
        .iter()
        .map(|v| VehicleListing {
            vehicle: v.clone(),
            available: stock.available(&v.id).unwrap_or(v.stock),
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&listings)?);
    }

    let blocks: Vec<String> = listings
        .iter()
        .map(|l| render_listing(config, l))
        .collect();
    Ok(blocks.join("\n\n"))
}

fn render_listing(config: &ConfigState, listing: &VehicleListing) -> String {
    let v = &listing.vehicle;
    let mut lines = vec![format!(
        "{}{} ({}, {})",
        icon_prefix(&v.icon),
        v.name,
        v.id,
        v.vehicle_type
    )];
    if !v.description.is_empty() {
        lines.push(format!("   {}", v.description));
    }
    lines.push(format!(
        "   {}, {} of {} available",
        price_per_day(config, v.price_per_day),
        listing.available,
        v.stock
    ));
    lines.join("\n")
}

fn icon_prefix(icon: &str) -> String {
    if icon.is_empty() {
        String::new()
    } else {
        format!("{} ", icon)
    }
}

/// Lists discount tiers, highest threshold first.
///
/// With `days`, also says which tier applies and how many more days would
/// reach the next one.
pub fn list_discounts(config: &ConfigState, days: Option<u32>) -> String {
    debug!(?days, "discounts command");

    let tiers = &config.calculator.discounts;
    if tiers.is_empty() {
        return "No discounts configured.".to_string();
    }

    let mut sorted: Vec<&DiscountTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| b.min_days.cmp(&a.min_days));

    let mut lines: Vec<String> = sorted
        .iter()
        .map(|t| {
            format!(
                "{:<18}{:>3}+ days  {}",
                t.name,
                t.min_days,
                t.percentage
            )
        })
        .collect();

    if let Some(days) = days {
        lines.push(String::new());
        match resolve_discount(tiers, days) {
            Some(tier) => lines.push(format!(
                "{} day(s): {} ({}) applies",
                days, tier.name, tier.percentage
            )),
            None => lines.push(format!("{} day(s): no discount", days)),
        }
        if let Some(next) = next_tier(tiers, days) {
            lines.push(format!(
                "Rent {} more day(s) to get {} ({})",
                next.days_needed, next.tier.name, next.tier.percentage
            ));
        }
    }

    lines.join("\n")
}

/// Puts every vehicle back to its catalog stock.
///
/// Saved transactions are kept; only the remaining units change.
pub async fn restock(config: &ConfigState, db: &DbState) -> CliResult<String> {
    debug!("restock command");

    let stock = db.inner().stock().reset(&config.calculator).await?;
    info!(vehicles = stock.levels().len(), "Stock restored");
    Ok(format!("Stock restored for {} vehicle(s)", stock.levels().len()))
}

/// `Rp 350.000 / day` style price, used by the quote summary too.
pub(crate) fn price_per_day(config: &ConfigState, price: Money) -> String {
    format!("{} / day", config.format_currency(price))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_discounts() {
        let config = ConfigState::default();
        let out = list_discounts(&config, None);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Gold Discount"));
        assert!(lines[0].ends_with("15%"));
        assert!(lines[1].starts_with("Bronze Discount"));
    }

    #[test]
    fn test_list_discounts_for_days() {
        let config = ConfigState::default();

        let out = list_discounts(&config, Some(5));
        assert!(out.contains("5 day(s): Bronze Discount (10%) applies"));
        assert!(out.contains("Rent 2 more day(s) to get Gold Discount (15%)"));

        let out = list_discounts(&config, Some(1));
        assert!(out.contains("1 day(s): no discount"));
        assert!(out.contains("Rent 2 more day(s) to get Bronze Discount (10%)"));

        let out = list_discounts(&config, Some(10));
        assert!(out.contains("Gold Discount (15%) applies"));
        assert!(!out.contains("more day(s)"));
    }

    #[test]
    fn test_no_tiers() {
        let mut config = ConfigState::default();
        config.calculator.discounts.clear();
        assert_eq!(list_discounts(&config, Some(3)), "No discounts configured.");
    }

    #[tokio::test]
    async fn test_list_vehicles_shows_live_stock() {
        let config = ConfigState::default();
        let db = DbState::in_memory().await.unwrap();

        let mut stock = db.inner().stock().load(&config.calculator).await.unwrap();
        stock.reserve("innova", 2).unwrap();
        db.inner().stock().save(&stock).await.unwrap();

        let out = list_vehicles(&config, &db, false).await.unwrap();
        assert!(out.contains("Toyota Innova (innova, car)"));
        assert!(out.contains("Rp 500.000 / day, 1 of 3 available"));
        assert!(out.contains("Rp 75.000 / day, 10 of 10 available"));

        let json = list_vehicles(&config, &db, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["id"], "innova");
        assert_eq!(value[1]["available"], 1);
        assert_eq!(value[1]["type"], "car");
    }

    #[tokio::test]
    async fn test_restock_after_selling_out() {
        use crate::commands::quote::{quote, QuoteOptions};
        use chrono::Utc;
        use gorent_core::RentalRequest;

        let config = ConfigState::default();
        let db = DbState::in_memory().await.unwrap();
        let options = QuoteOptions {
            save: true,
            ..Default::default()
        };
        let request = RentalRequest::new("innova", "Budi Santoso", 2, 3);
        quote(&config, &db, &request, options, Utc::now()).await.unwrap();

        let single = RentalRequest::new("innova", "Siti Rahma", 2, 1);
        assert!(quote(&config, &db, &single, QuoteOptions::default(), Utc::now())
            .await
            .is_err());

        let out = restock(&config, &db).await.unwrap();
        assert_eq!(out, "Stock restored for 4 vehicle(s)");

        let listing = list_vehicles(&config, &db, false).await.unwrap();
        assert!(listing.contains("Rp 500.000 / day, 3 of 3 available"));
        assert!(quote(&config, &db, &single, QuoteOptions::default(), Utc::now())
            .await
            .is_ok());
        assert_eq!(db.inner().transactions().load().await.unwrap().len(), 1);
    }

    #[test]
    fn test_price_per_day() {
        let config = ConfigState::default();
        assert_eq!(price_per_day(&config, Money::new(100_000)), "Rp 100.000 / day");
    }
}
