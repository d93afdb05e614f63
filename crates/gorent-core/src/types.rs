//! # Domain Types
//!
//! Core domain types used throughout GO-RENT.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Vehicle      │   │  DiscountTier   │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("avanza")  │   │  min_days       │   │  transaction_id │       │
//! │  │  name           │   │  percentage     │   │  customer_name  │       │
//! │  │  vehicle_type   │   │  name           │   │  subtotal       │       │
//! │  │  price_per_day  │   └─────────────────┘   │  discount?      │       │
//! │  │  stock          │                         │  total          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Percent      │   │  VehicleType    │   │ RentalRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u32, 15 = 15%  │   │  Car            │   │  raw form input │       │
//! │  └─────────────────┘   │  Motorcycle     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`Transaction`] copies the vehicle's name, type, icon and price at the
//! moment of calculation. Later catalog edits never change saved history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::TRANSACTION_ID_PREFIX;

// =============================================================================
// Percent
// =============================================================================

/// A whole-number percentage (15 = 15%).
///
/// Discount tiers are configured in whole percents, so there is no need for
/// basis points here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Percent(value)
    }

    /// Returns the whole-number value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// Vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

impl VehicleType {
    /// Lowercase identifier, as stored in exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle available for rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vehicle {
    /// Catalog key, e.g. `"avanza"`.
    pub id: String,

    /// Display name shown on quotes and receipts.
    pub name: String,

    /// Car or motorcycle.
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    /// Rental price for one unit for one day.
    pub price_per_day: Money,

    /// Units owned by the business.
    pub stock: u32,

    /// Emoji shown next to the name.
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Discounts
// =============================================================================

/// A (minimum-days, percentage) discount rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    /// Rentals of at least this many days qualify.
    pub min_days: u32,

    /// Percentage taken off the subtotal.
    pub percentage: Percent,

    /// Label, e.g. "Gold Discount".
    pub name: String,
}

/// The discount actually applied to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub name: String,
    pub percentage: Percent,
    pub amount: Money,
}

/// The cheapest tier the customer has not reached yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NextTier {
    /// Extra days needed to qualify.
    pub days_needed: u32,
    pub tier: DiscountTier,
}

// =============================================================================
// Rental Request
// =============================================================================

/// Raw calculator form input.
///
/// Counts are signed so that nonsense like `-3` days reaches validation and
/// gets a proper message instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    pub vehicle_id: String,
    pub customer_name: String,
    pub days: i64,
    pub units: i64,
}

impl RentalRequest {
    pub fn new(
        vehicle_id: impl Into<String>,
        customer_name: impl Into<String>,
        days: i64,
        units: i64,
    ) -> Self {
        RentalRequest {
            vehicle_id: vehicle_id.into(),
            customer_name: customer_name.into(),
            days,
            units,
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A calculated rental quote. Once saved it becomes part of the history.
///
/// Serialized in camelCase: this is the exact shape stored under the
/// `gorent_transactions` key and emitted by the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// `GR-<base36 millis>-<4 random chars>`.
    pub transaction_id: String,
    pub customer_name: String,
    pub vehicle_id: String,
    /// Vehicle name at time of calculation (frozen).
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub vehicle_icon: String,
    /// Price per day at time of calculation (frozen).
    pub price_per_day: Money,
    pub days: u32,
    pub units: u32,
    /// price_per_day × days × units.
    pub subtotal: Money,
    pub discount: Option<AppliedDiscount>,
    /// subtotal − discount amount.
    pub total: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Discount amount, zero when no tier applied.
    pub fn discount_amount(&self) -> Money {
        self.discount
            .as_ref()
            .map(|d| d.amount)
            .unwrap_or_default()
    }

    /// Discount percentage, zero when no tier applied.
    pub fn discount_percentage(&self) -> Percent {
        self.discount
            .as_ref()
            .map(|d| d.percentage)
            .unwrap_or_default()
    }
}

/// One-unit estimate for the quick price buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuickQuote {
    pub vehicle_name: String,
    pub days: u32,
    pub subtotal: Money,
    pub discount_percentage: Percent,
    pub discount_amount: Money,
    pub total: Money,
}

// =============================================================================
// Transaction Ids
// =============================================================================

/// Generates a transaction id such as `GR-M2F3K9QX-7AB2`.
///
/// The middle part is the timestamp in base 36, the tail four random base-36
/// characters taken from a v4 UUID.
pub fn generate_transaction_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u128;
    let random = uuid::Uuid::new_v4().as_u128();
    let suffix = to_base36(random % 36u128.pow(4));
    format!(
        "{}-{}-{:0>4}",
        TRANSACTION_ID_PREFIX,
        to_base36(millis),
        suffix
    )
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// =============================================================================
// Unit Tests
// =============================================================================
