//! # Catalog Module
//!
//! The calculator configuration (vehicles, discount tiers, validation rules,
//! currency) and the stock ledger that tracks units left per vehicle.
//!
//! ## Configuration Shape
//! ```toml
//! [[vehicles]]
//! id = "avanza"
//! name = "Toyota Avanza"
//! type = "car"
//! price_per_day = 350000
//! stock = 5
//!
//! [[discounts]]
//! min_days = 7
//! percentage = 15
//! name = "Gold Discount"
//!
//! [validation]
//! min_days = 1
//! max_days = 30
//!
//! [currency]
//! code = "IDR"
//! symbol = "Rp"
//! ```
//!
//! Loading the file is the app's business; this module only describes the
//! shape and checks that it is consistent.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{CurrencyFormat, Money};
use crate::pricing::subtotal;
use crate::types::{DiscountTier, Percent, Vehicle, VehicleType};

// =============================================================================
// Validation Rules
// =============================================================================

/// Bounds enforced on the calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ValidationRules {
    pub min_days: i64,
    pub max_days: i64,
    pub min_units: i64,
    pub max_units: i64,
    pub name_min_length: usize,
    pub name_max_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            min_days: 1,
            max_days: 30,
            min_units: 1,
            max_units: 5,
            name_min_length: 2,
            name_max_length: 50,
        }
    }
}

// =============================================================================
// Calculator Config
// =============================================================================

/// Everything the price calculation needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Vehicles in display order.
    pub vehicles: Vec<Vehicle>,

    /// Discount tiers, any order.
    pub discounts: Vec<DiscountTier>,

    pub validation: ValidationRules,

    pub currency: CurrencyFormat,
}

impl Default for CalculatorConfig {
    /// The GO-RENT launch catalog.
    fn default() -> Self {
        CalculatorConfig {
            vehicles: vec![
                vehicle(
                    "avanza",
                    "Toyota Avanza",
                    VehicleType::Car,
                    350_000,
                    5,
                    "🚗",
                    "7-seat MPV, great for families",
                ),
                vehicle(
                    "innova",
                    "Toyota Innova",
                    VehicleType::Car,
                    500_000,
                    3,
                    "🚙",
                    "Premium 7-seat MPV, comfortable on long trips",
                ),
                vehicle(
                    "beat",
                    "Honda Beat",
                    VehicleType::Motorcycle,
                    75_000,
                    10,
                    "🏍️",
                    "Fuel-efficient automatic scooter",
                ),
                vehicle(
                    "vario",
                    "Honda Vario",
                    VehicleType::Motorcycle,
                    100_000,
                    8,
                    "🏍️",
                    "Premium automatic scooter with roomy storage",
                ),
            ],
            discounts: vec![
                DiscountTier {
                    min_days: 7,
                    percentage: Percent::new(15),
                    name: "Gold Discount".to_string(),
                },
                DiscountTier {
                    min_days: 3,
                    percentage: Percent::new(10),
                    name: "Bronze Discount".to_string(),
                },
            ],
            validation: ValidationRules::default(),
            currency: CurrencyFormat::default(),
        }
    }
}

fn vehicle(
    id: &str,
    name: &str,
    vehicle_type: VehicleType,
    price_per_day: i64,
    stock: u32,
    icon: &str,
    description: &str,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        vehicle_type,
        price_per_day: Money::new(price_per_day),
        stock,
        icon: icon.to_string(),
        description: description.to_string(),
    }
}

impl CalculatorConfig {
    /// Looks up a vehicle by catalog id.
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Looks up a vehicle, failing with `VehicleNotFound`.
    pub fn require_vehicle(&self, id: &str) -> CoreResult<&Vehicle> {
        self.vehicle(id)
            .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))
    }

    /// Checks the configuration for contradictions.
    ///
    /// ## Rules
    /// - vehicle ids are non-empty and unique
    /// - prices are not negative
    /// - tier thresholds are distinct and at least 1 day
    /// - tier percentages are at most 100
    /// - every min/max pair is ordered, day and unit bounds fit in `u32`
    /// - the largest possible quote of every vehicle fits in an amount
    pub fn validate(&self) -> CoreResult<()> {
        let mut ids = HashSet::new();
        for v in &self.vehicles {
            if v.id.trim().is_empty() {
                return Err(CoreError::InvalidConfig("vehicle id is empty".into()));
            }
            if !ids.insert(v.id.as_str()) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate vehicle id '{}'",
                    v.id
                )));
            }
            if v.price_per_day.is_negative() {
                return Err(CoreError::InvalidConfig(format!(
                    "vehicle '{}' has a negative price",
                    v.id
                )));
            }
        }

        let mut thresholds = HashSet::new();
        for tier in &self.discounts {
            if tier.min_days == 0 {
                return Err(CoreError::InvalidConfig(format!(
                    "tier '{}' must start at 1 day or more",
                    tier.name
                )));
            }
            if !thresholds.insert(tier.min_days) {
                return Err(CoreError::InvalidConfig(format!(
                    "two tiers share min_days = {}",
                    tier.min_days
                )));
            }
            if tier.percentage.value() > 100 {
                return Err(CoreError::InvalidConfig(format!(
                    "tier '{}' exceeds 100%",
                    tier.name
                )));
            }
        }

        let rules = &self.validation;
        if rules.min_days < 1 || rules.min_days > rules.max_days {
            return Err(CoreError::InvalidConfig(
                "validation days bounds are not ordered".into(),
            ));
        }
        if rules.min_units < 1 || rules.min_units > rules.max_units {
            return Err(CoreError::InvalidConfig(
                "validation units bounds are not ordered".into(),
            ));
        }
        if rules.name_min_length > rules.name_max_length {
            return Err(CoreError::InvalidConfig(
                "validation name length bounds are not ordered".into(),
            ));
        }

        let (Ok(max_days), Ok(max_units)) =
            (u32::try_from(rules.max_days), u32::try_from(rules.max_units))
        else {
            return Err(CoreError::InvalidConfig(format!(
                "validation max_days and max_units must be at most {}",
                u32::MAX
            )));
        };
        for v in &self.vehicles {
            if subtotal(v.price_per_day, max_days, max_units).is_none() {
                return Err(CoreError::InvalidConfig(format!(
                    "vehicle '{}': price × max_days × max_units is too large",
                    v.id
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Stock Ledger
// =============================================================================

/// Units still available per vehicle.
///
/// Starts from catalog stock; each saved transaction takes its units out.
/// Levels are always within `0..=catalog stock`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockLedger {
    remaining: BTreeMap<String, u32>,
    capacity: BTreeMap<String, u32>,
}

impl StockLedger {
    /// Full stock for every catalog vehicle.
    pub fn from_catalog(config: &CalculatorConfig) -> Self {
        let capacity: BTreeMap<String, u32> = config
            .vehicles
            .iter()
            .map(|v| (v.id.clone(), v.stock))
            .collect();
        StockLedger {
            remaining: capacity.clone(),
            capacity,
        }
    }

    /// Catalog stock overlaid with persisted levels.
    ///
    /// Unknown vehicle ids are ignored; levels above catalog stock are
    /// clamped down to it.
    pub fn with_levels(config: &CalculatorConfig, levels: &BTreeMap<String, u32>) -> Self {
        let mut ledger = Self::from_catalog(config);
        for (id, level) in levels {
            if let Some(cap) = ledger.capacity.get(id) {
                ledger.remaining.insert(id.clone(), (*level).min(*cap));
            }
        }
        ledger
    }

    /// Units available right now, `None` for unknown vehicles.
    pub fn available(&self, vehicle_id: &str) -> Option<u32> {
        self.remaining.get(vehicle_id).copied()
    }

    /// Catalog stock for a vehicle.
    pub fn capacity(&self, vehicle_id: &str) -> Option<u32> {
        self.capacity.get(vehicle_id).copied()
    }

    /// Takes `units` out of stock and returns the new level.
    ///
    /// Saturates at zero.
    pub fn reserve(&mut self, vehicle_id: &str, units: u32) -> CoreResult<u32> {
        let level = self
            .remaining
            .get_mut(vehicle_id)
            .ok_or_else(|| CoreError::VehicleNotFound(vehicle_id.to_string()))?;
        *level = level.saturating_sub(units);
        Ok(*level)
    }

    /// Puts every vehicle back to catalog stock.
    pub fn restock_all(&mut self) {
        self.remaining = self.capacity.clone();
    }

    /// Current levels, keyed by vehicle id.
    pub fn levels(&self) -> &BTreeMap<String, u32> {
        &self.remaining
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
