//! # Price Calculation
//!
//! Turns a validated rental request into a [`Transaction`].
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = price_per_day × days × units        (exact, no rounding)   │
//! │  discount = round(subtotal × tier% / 100)       (once, half up)        │
//! │  total    = subtotal − discount                                        │
//! │                                                                         │
//! │  Avanza: 350.000 × 7 × 1 = 2.450.000                                   │
//! │          Gold 15%        =   367.500                                   │
//! │          total           = 2.082.500                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call recomputes from scratch; nothing is cached between quotes.

use chrono::{DateTime, Utc};

use crate::catalog::{CalculatorConfig, StockLedger};
use crate::discount::apply_discount;
use crate::error::{CoreError, CoreResult, ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::{generate_transaction_id, QuickQuote, RentalRequest, Transaction};
use crate::validation::validate_request;

/// Validates and prices a rental request.
///
/// ## Returns
/// * `Ok(Transaction)` - an unsaved quote stamped with `now`
/// * `Err(CoreError::InvalidRequest)` - every violated rule, nothing priced
/// * `Err(CoreError::AmountTooLarge)` - the subtotal overflows
pub fn calculate(
    config: &CalculatorConfig,
    stock: &StockLedger,
    request: &RentalRequest,
    now: DateTime<Utc>,
) -> CoreResult<Transaction> {
    let errors = validate_request(request, config, stock);
    if !errors.is_empty() {
        return Err(CoreError::InvalidRequest(ValidationErrors::from(errors)));
    }

    let vehicle = config.require_vehicle(request.vehicle_id.trim())?;

    let days = count("days", request.days)?;
    let units = count("units", request.units)?;

    let subtotal = subtotal(vehicle.price_per_day, days, units)
        .ok_or_else(|| CoreError::AmountTooLarge(vehicle.name.clone()))?;
    let discount = apply_discount(&config.discounts, subtotal, days);
    let total = subtotal - discount.as_ref().map(|d| d.amount).unwrap_or_default();

    Ok(Transaction {
        transaction_id: generate_transaction_id(now),
        customer_name: request.customer_name.trim().to_string(),
        vehicle_id: vehicle.id.clone(),
        vehicle_name: vehicle.name.clone(),
        vehicle_type: vehicle.vehicle_type,
        vehicle_icon: vehicle.icon.clone(),
        price_per_day: vehicle.price_per_day,
        days,
        units,
        subtotal,
        discount,
        total,
        timestamp: now,
    })
}

/// Prices one unit for `days` without any form validation.
///
/// Used by the "how much for a week?" shortcuts on the price list.
pub fn quick_quote(config: &CalculatorConfig, vehicle_id: &str, days: u32) -> CoreResult<QuickQuote> {
    let vehicle = config.require_vehicle(vehicle_id)?;

    let subtotal = subtotal(vehicle.price_per_day, days, 1)
        .ok_or_else(|| CoreError::AmountTooLarge(vehicle.name.clone()))?;
    let discount = apply_discount(&config.discounts, subtotal, days);
    let (discount_percentage, discount_amount) = discount
        .map(|d| (d.percentage, d.amount))
        .unwrap_or_default();

    Ok(QuickQuote {
        vehicle_name: vehicle.name.clone(),
        days,
        subtotal,
        discount_percentage,
        discount_amount,
        total: subtotal - discount_amount,
    })
}

/// `price_per_day × days × units`, `None` when it overflows.
pub fn subtotal(price_per_day: Money, days: u32, units: u32) -> Option<Money> {
    price_per_day
        .checked_multiply(i64::from(days))?
        .checked_multiply(i64::from(units))
}

/// Narrows a validated count. Rules wider than `u32` are refused here
/// rather than truncated.
fn count(field: &str, value: i64) -> CoreResult<u32> {
    u32::try_from(value).map_err(|_| {
        let error = ValidationError::AboveMaximum {
            field: field.to_string(),
            max: i64::from(u32::MAX),
        };
        CoreError::InvalidRequest(ValidationErrors::from(vec![error]))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percent;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
    }

    fn setup() -> (CalculatorConfig, StockLedger) {
        let config = CalculatorConfig::default();
        let stock = StockLedger::from_catalog(&config);
        (config, stock)
    }

    #[test]
    fn test_reference_example() {
        let (config, stock) = setup();
        let request = RentalRequest::new("avanza", "Budi Santoso", 7, 1);

        let tx = calculate(&config, &stock, &request, now()).unwrap();

        assert_eq!(tx.subtotal, Money::new(2_450_000));
        let discount = tx.discount.as_ref().unwrap();
        assert_eq!(discount.percentage, Percent::new(15));
        assert_eq!(discount.amount, Money::new(367_500));
        assert_eq!(tx.total, Money::new(2_082_500));
        assert_eq!(tx.vehicle_name, "Toyota Avanza");
        assert_eq!(tx.timestamp, now());
        assert!(tx.transaction_id.starts_with("GR-"));
    }

    #[test]
    fn test_no_discount_for_short_rentals() {
        let (config, stock) = setup();
        let request = RentalRequest::new("beat", "Siti", 2, 3);

        let tx = calculate(&config, &stock, &request, now()).unwrap();

        assert_eq!(tx.subtotal, Money::new(75_000 * 2 * 3));
        assert!(tx.discount.is_none());
        assert_eq!(tx.total, tx.subtotal);
    }

    #[test]
    fn test_invariants_hold_for_every_valid_input() {
        let (config, stock) = setup();

        for vehicle in &config.vehicles {
            for days in 1..=30i64 {
                for units in 1..=vehicle.stock.min(5) as i64 {
                    let request = RentalRequest::new(&vehicle.id, "Budi", days, units);
                    let tx = calculate(&config, &stock, &request, now()).unwrap();

                    let expected = vehicle.price_per_day.amount() * days * units;
                    assert_eq!(tx.subtotal.amount(), expected);

                    let pct = tx.discount_percentage().value() as i64;
                    let rounded = (expected * pct + 50).div_euclid(100);
                    assert_eq!(tx.discount_amount().amount(), rounded);
                    assert_eq!(tx.total, tx.subtotal - tx.discount_amount());
                }
            }
        }
    }

    #[test]
    fn test_invalid_request_reports_every_error() {
        let (config, stock) = setup();
        let request = RentalRequest::new("innova", "", 0, 4);

        let err = calculate(&config, &stock, &request, now()).unwrap_err();
        match err {
            CoreError::InvalidRequest(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::InsufficientStock { available: 3, .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_units_never_exceed_stock() {
        let (config, mut stock) = setup();
        stock.reserve("innova", 3).unwrap();

        let request = RentalRequest::new("innova", "Budi", 1, 1);
        assert!(matches!(
            calculate(&config, &stock, &request, now()),
            Err(CoreError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_name_is_trimmed() {
        let (config, stock) = setup();
        let request = RentalRequest::new("vario", "  Dewi Lestari ", 1, 1);
        let tx = calculate(&config, &stock, &request, now()).unwrap();
        assert_eq!(tx.customer_name, "Dewi Lestari");
    }

    #[test]
    fn test_recalculation_yields_fresh_ids() {
        let (config, stock) = setup();
        let request = RentalRequest::new("vario", "Dewi", 3, 1);
        let a = calculate(&config, &stock, &request, now()).unwrap();
        let b = calculate(&config, &stock, &request, now()).unwrap();
        assert_eq!(a.total, b.total);
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[test]
    fn test_quick_quote() {
        let config = CalculatorConfig::default();

        let quote = quick_quote(&config, "innova", 3).unwrap();
        assert_eq!(quote.subtotal, Money::new(1_500_000));
        assert_eq!(quote.discount_percentage, Percent::new(10));
        assert_eq!(quote.discount_amount, Money::new(150_000));
        assert_eq!(quote.total, Money::new(1_350_000));

        let quote = quick_quote(&config, "beat", 1).unwrap();
        assert!(quote.discount_percentage.is_zero());
        assert_eq!(quote.total, Money::new(75_000));

        assert!(matches!(
            quick_quote(&config, "jazz", 2),
            Err(CoreError::VehicleNotFound(_))
        ));
    }

    #[test]
    fn test_subtotal_helper() {
        assert_eq!(subtotal(Money::new(100_000), 4, 2), Some(Money::new(800_000)));
        assert_eq!(subtotal(Money::new(i64::MAX / 2), 3, 1), None);
    }

    #[test]
    fn test_days_wider_than_u32_are_not_truncated() {
        let (mut config, stock) = setup();
        config.validation.max_days = 10_000_000_000;

        // 2^32 + 1 would wrap to 1 day if narrowed with `as`.
        let request = RentalRequest::new("avanza", "Budi", 4_294_967_297, 1);
        match calculate(&config, &stock, &request, now()).unwrap_err() {
            CoreError::InvalidRequest(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::AboveMaximum { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflowing_price_is_an_error() {
        let (mut config, stock) = setup();
        config.vehicles[0].price_per_day = Money::new(i64::MAX / 2);

        let request = RentalRequest::new("avanza", "Budi", 3, 1);
        assert!(matches!(
            calculate(&config, &stock, &request, now()),
            Err(CoreError::AmountTooLarge(_))
        ));
        assert!(matches!(
            quick_quote(&config, "avanza", 3),
            Err(CoreError::AmountTooLarge(_))
        ));
    }
}
