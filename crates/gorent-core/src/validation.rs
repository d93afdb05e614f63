//! # Validation Module
//!
//! Input validation for the rental calculator form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Calculator Form                                    │
//! │                                                                         │
//! │  vehicle ─────► validate_vehicle_selection  (selected? in catalog?)    │
//! │  name    ─────► validate_customer_name      (length, letters only)     │
//! │  days    ─────► validate_days               (min_days..=max_days)      │
//! │  units   ─────► validate_units              (min..=max, ≤ live stock)  │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  validate_request collects EVERY violation, in this order, so the      │
//! │  user can fix the whole form in one pass.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each predicate is pure: `Ok(())` or a [`ValidationError`] whose display
//! text is the message to show.
//!
//! ## Usage
//! ```rust
//! use gorent_core::validation::{validate_customer_name, validate_days};
//! use gorent_core::ValidationRules;
//!
//! let rules = ValidationRules::default();
//! assert!(validate_customer_name("Siti Rahma", &rules).is_ok());
//! assert!(validate_days(31, &rules).is_err());
//! ```

use crate::catalog::{CalculatorConfig, StockLedger, ValidationRules};
use crate::error::ValidationError;
use crate::types::{RentalRequest, Vehicle};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Length (in characters) within `name_min_length..=name_max_length`
/// - Only ASCII letters, spaces, apostrophes and hyphens
///   ("O'Neil", "Anne-Marie")
pub fn validate_customer_name(name: &str, rules: &ValidationRules) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let length = name.chars().count();

    if length < rules.name_min_length {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: rules.name_min_length,
        });
    }

    if length > rules.name_max_length {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: rules.name_max_length,
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '\'' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "may only contain letters and spaces".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the rental length in days.
pub fn validate_days(days: i64, rules: &ValidationRules) -> ValidationResult<()> {
    check_range("days", days, rules.min_days, rules.max_days)
}

/// Validates the number of units.
///
/// ## Rules
/// - Within `min_units..=max_units`
/// - Not above `available` (live stock of the chosen vehicle), when known
///
/// ## User Workflow
/// ```text
/// Innova selected, 3 in stock, user asks for 4
///      │
///      ▼
/// validate_units(4, rules, Some((innova, 3)))
///      │
///      ▼
/// InsufficientStock: "Only 3 unit(s) of Toyota Innova in stock"
/// ```
pub fn validate_units(
    units: i64,
    rules: &ValidationRules,
    stock: Option<(&Vehicle, u32)>,
) -> ValidationResult<()> {
    check_range("units", units, rules.min_units, rules.max_units)?;

    if let Some((vehicle, available)) = stock {
        if units > available as i64 {
            return Err(ValidationError::InsufficientStock {
                vehicle: vehicle.name.clone(),
                available,
            });
        }
    }

    Ok(())
}

fn check_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min,
        });
    }

    if value > max {
        return Err(ValidationError::AboveMaximum {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Validates that a vehicle was chosen and exists in the catalog.
pub fn validate_vehicle_selection<'a>(
    vehicle_id: &str,
    config: &'a CalculatorConfig,
) -> ValidationResult<&'a Vehicle> {
    let vehicle_id = vehicle_id.trim();

    if vehicle_id.is_empty() {
        return Err(ValidationError::Required {
            field: "vehicle".to_string(),
        });
    }

    config
        .vehicle(vehicle_id)
        .ok_or_else(|| ValidationError::UnknownVehicle(vehicle_id.to_string()))
}

// =============================================================================
// Form Validator
// =============================================================================

/// Runs every rule against a request and returns all violations.
///
/// The units rule only runs when the vehicle is valid, since stock is
/// per vehicle. An empty vector means the request can be priced.
pub fn validate_request(
    request: &RentalRequest,
    config: &CalculatorConfig,
    stock: &StockLedger,
) -> Vec<ValidationError> {
    let rules = &config.validation;
    let mut errors = Vec::new();

    let vehicle = match validate_vehicle_selection(&request.vehicle_id, config) {
        Ok(vehicle) => Some(vehicle),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if let Err(e) = validate_customer_name(&request.customer_name, rules) {
        errors.push(e);
    }

    if let Err(e) = validate_days(request.days, rules) {
        errors.push(e);
    }

    if let Some(vehicle) = vehicle {
        let available = stock.available(&vehicle.id).unwrap_or(vehicle.stock);
        if let Err(e) = validate_units(request.units, rules, Some((vehicle, available))) {
            errors.push(e);
        }
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn test_validate_customer_name() {
        let rules = rules();

        assert!(validate_customer_name("Budi Santoso", &rules).is_ok());
        assert!(validate_customer_name("  Al  ", &rules).is_ok());
        assert!(validate_customer_name("O'Neil", &rules).is_ok());
        assert!(validate_customer_name("Anne-Marie", &rules).is_ok());

        assert!(matches!(
            validate_customer_name("   ", &rules),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_customer_name("B", &rules),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(matches!(
            validate_customer_name(&"A".repeat(51), &rules),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        assert!(matches!(
            validate_customer_name("R2D2", &rules),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_customer_name("Budi!", &rules).is_err());
    }

    #[test]
    fn test_name_length_boundaries() {
        let rules = rules();
        assert!(validate_customer_name("Ab", &rules).is_ok());
        assert!(validate_customer_name(&"A".repeat(50), &rules).is_ok());
    }

    #[test]
    fn test_validate_days() {
        let rules = rules();

        assert!(validate_days(1, &rules).is_ok());
        assert!(validate_days(30, &rules).is_ok());

        assert_eq!(
            validate_days(0, &rules).unwrap_err().to_string(),
            "days must be at least 1"
        );
        assert!(validate_days(-4, &rules).is_err());
        assert_eq!(
            validate_days(31, &rules).unwrap_err().to_string(),
            "days must be at most 30"
        );
    }

    #[test]
    fn test_validate_units_against_stock() {
        let rules = rules();
        let config = CalculatorConfig::default();
        let innova = config.vehicle("innova").unwrap();

        assert!(validate_units(1, &rules, None).is_ok());
        assert!(validate_units(5, &rules, None).is_ok());
        assert!(validate_units(0, &rules, None).is_err());
        assert!(validate_units(6, &rules, None).is_err());

        assert!(validate_units(3, &rules, Some((innova, 3))).is_ok());
        assert_eq!(
            validate_units(4, &rules, Some((innova, 3))),
            Err(ValidationError::InsufficientStock {
                vehicle: "Toyota Innova".to_string(),
                available: 3
            })
        );
        assert!(validate_units(1, &rules, Some((innova, 0))).is_err());
    }

    #[test]
    fn test_validate_vehicle_selection() {
        let config = CalculatorConfig::default();

        assert_eq!(
            validate_vehicle_selection("beat", &config).unwrap().name,
            "Honda Beat"
        );
        assert!(matches!(
            validate_vehicle_selection("", &config),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_vehicle_selection("jazz", &config),
            Err(ValidationError::UnknownVehicle(_))
        ));
    }

    #[test]
    fn test_validate_request_collects_all_errors_in_order() {
        let config = CalculatorConfig::default();
        let stock = StockLedger::from_catalog(&config);
        let request = RentalRequest::new("avanza", "X", 45, 9);

        let errors = validate_request(&request, &config, &stock);
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "days", "units"]);
    }

    #[test]
    fn test_validate_request_skips_units_without_vehicle() {
        let config = CalculatorConfig::default();
        let stock = StockLedger::from_catalog(&config);
        let request = RentalRequest::new("", "Budi", 2, 99);

        let errors = validate_request(&request, &config, &stock);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "vehicle");
    }

    #[test]
    fn test_validate_request_uses_live_stock() {
        let config = CalculatorConfig::default();
        let mut stock = StockLedger::from_catalog(&config);
        stock.reserve("innova", 2).unwrap();

        let ok = RentalRequest::new("innova", "Budi", 2, 1);
        assert!(validate_request(&ok, &config, &stock).is_empty());

        let too_many = RentalRequest::new("innova", "Budi", 2, 2);
        let errors = validate_request(&too_many, &config, &stock);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InsufficientStock { available: 1, .. }]
        ));
    }
}
