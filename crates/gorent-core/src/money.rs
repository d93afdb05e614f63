//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    2450000 × 0.15 = 367499.99999999994  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer amounts in the smallest currency unit           │
//! │    (2450000 × 15 + 50) / 100 = 367500  ✅                              │
//! │                                                                         │
//! │  Rupiah has no minor unit in practice, so one unit = Rp 1.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gorent_core::money::Money;
//! use gorent_core::types::Percent;
//!
//! let per_day = Money::new(350_000);
//! let subtotal = per_day.checked_multiply(7).unwrap();
//! let discount = subtotal.percent_of(Percent::new(15));
//!
//! assert_eq!(subtotal.amount(), 2_450_000);
//! assert_eq!(discount.amount(), 367_500);
//! assert_eq!((subtotal - discount).amount(), 2_082_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: discount lines are rendered as negative amounts
/// - **Single field tuple struct**: serializes as a bare integer, so JSON
///   exports and TOML price lists read `350000`, not `{ "0": 350000 }`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Vehicle.price_per_day ──► × days × units ──► Transaction.subtotal     │
/// │                                                     │                   │
/// │                          DiscountTier.percentage ──►│ percent_of        │
/// │                                                     ▼                   │
/// │                         Transaction.total = subtotal − discount        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an amount in the smallest currency unit.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a count (days, units), `None` on overflow.
    ///
    /// No rounding happens here: `350000 × 7 × 2` is exact.
    #[inline]
    pub const fn checked_multiply(&self, count: i64) -> Option<Self> {
        match self.0.checked_mul(count) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Returns `round(self × percent / 100)`.
    ///
    /// ## Rounding
    /// Half rounds towards positive infinity (`floor(x + 0.5)`), which is
    /// what the web calculator has always shown customers:
    ///
    /// ```text
    /// 1001 × 15% = 150.15 → 150
    /// 1010 × 15% = 151.5  → 152
    /// ```
    ///
    /// i128 keeps the intermediate product from overflowing.
    pub fn percent_of(&self, percent: Percent) -> Money {
        let scaled = self.0 as i128 * percent.value() as i128 + 50;
        Money(scaled.div_euclid(100) as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    pub fn apply_percentage_discount(&self, percent: Percent) -> Money {
        *self - self.percent_of(percent)
    }

    /// Formats the absolute amount with a thousands separator.
    ///
    /// ```rust
    /// use gorent_core::money::Money;
    ///
    /// assert_eq!(Money::new(2_082_500).grouped('.'), "2.082.500");
    /// assert_eq!(Money::new(999).grouped('.'), "999");
    /// ```
    pub fn grouped(&self, separator: char) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// How money is rendered for people (receipts, price lists, CLI output).
///
/// Defaults to Indonesian Rupiah: `Rp 2.082.500`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "snake_case")]
pub struct CurrencyFormat {
    /// ISO 4217 code.
    pub code: String,

    /// Symbol placed before the amount.
    pub symbol: String,

    /// Digit group separator.
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            code: "IDR".to_string(),
            symbol: "Rp".to_string(),
            thousands_separator: '.',
        }
    }
}

impl CurrencyFormat {
    /// Formats an amount, e.g. `Rp 350.000` or `-Rp 367.500`.
    pub fn format(&self, money: Money) -> String {
        let sign = if money.is_negative() { "-" } else { "" };
        format!(
            "{}{} {}",
            sign,
            self.symbol,
            money.grouped(self.thousands_separator)
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the bare grouped amount (`2.082.500`).
///
/// Use [`CurrencyFormat::format`] when the symbol is wanted.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, self.grouped('.'))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Addition and subtraction saturate at the i64 bounds: totals summed from
// stored history must not panic.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
