//! # Discount Resolution
//!
//! Picks the discount tier for a rental duration.
//!
//! ## Selection Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tiers: Bronze (≥3 days, 10%)   Gold (≥7 days, 15%)                     │
//! │                                                                         │
//! │  days:  1   2 │ 3   4   5   6 │ 7   8  ...  30                          │
//! │         none  │    Bronze     │    Gold                                 │
//! │                                                                         │
//! │  The single tier with the LARGEST min_days that does not exceed the    │
//! │  rental length wins. Tiers never stack: 7 days is 15%, not 25%.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tier order in the configuration does not matter.

use crate::money::Money;
use crate::types::{AppliedDiscount, DiscountTier, NextTier};

/// Returns the highest-threshold tier reached by `days`, if any.
///
/// ```rust
/// use gorent_core::{discount::resolve_discount, CalculatorConfig};
///
/// let config = CalculatorConfig::default();
/// assert!(resolve_discount(&config.discounts, 2).is_none());
/// assert_eq!(resolve_discount(&config.discounts, 5).unwrap().name, "Bronze Discount");
/// assert_eq!(resolve_discount(&config.discounts, 30).unwrap().name, "Gold Discount");
/// ```
pub fn resolve_discount(tiers: &[DiscountTier], days: u32) -> Option<&DiscountTier> {
    tiers
        .iter()
        .filter(|tier| tier.min_days <= days)
        .max_by_key(|tier| tier.min_days)
}

/// Resolves the tier and computes its rounded amount on `subtotal`.
pub fn apply_discount(tiers: &[DiscountTier], subtotal: Money, days: u32) -> Option<AppliedDiscount> {
    resolve_discount(tiers, days).map(|tier| AppliedDiscount {
        name: tier.name.clone(),
        percentage: tier.percentage,
        amount: subtotal.percent_of(tier.percentage),
    })
}

/// The lowest tier not yet reached, with the number of extra days needed.
///
/// Returns `None` once the top tier applies.
pub fn next_tier(tiers: &[DiscountTier], days: u32) -> Option<NextTier> {
    tiers
        .iter()
        .filter(|tier| tier.min_days > days)
        .min_by_key(|tier| tier.min_days)
        .map(|tier| NextTier {
            days_needed: tier.min_days - days,
            tier: tier.clone(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
