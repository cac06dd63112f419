//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing form inputs as floats:                                        │
//! │    12.50 * 2 + 0.10 + 0.20 = 25.300000000000004  ❌ WRONG!             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1250 * 2 + 10 + 20 = 2530 cents                                     │
//! │                                                                         │
//! │  Form input ("12.50") is parsed straight into cents, never via f64.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use factura_core::money::Money;
//!
//! let price = Money::parse("12.50").unwrap();
//! assert_eq!(price.cents(), 1250);
//!
//! let line_total = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line_total.to_string(), "$25.00");
//! ```
//!
//! Arithmetic is checked: an amount that does not fit in `i64` cents is
//! `None`, never a wrapped or panicking value.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ProductForm.price ("12.50") ──► Money::parse ──► Product.price
///                                                     │
///                              Product.line_total() ◄─┘  (price × qty)
///                                       │
///                    DraftList.total() / Invoice.total ──► "Total USD: $33.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use factura_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a price typed into the product form.
    ///
    /// ## Accepted Input
    /// - `"12.50"`, `"12,50"` (comma decimal separator), `"8"`, `"8.5"`, `".75"`
    /// - an optional leading `$` and surrounding whitespace
    /// - an optional leading `-`
    ///
    /// At most two decimal places are accepted; anything else is an
    /// `InvalidFormat` error. Empty input is `Required`.
    ///
    /// ## Example
    /// ```rust
    /// use factura_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12,50").unwrap().cents(), 1250);
    /// assert_eq!(Money::parse("$8").unwrap().cents(), 800);
    /// assert!(Money::parse("12.505").is_err());
    /// assert!(Money::parse("").is_err());
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Money> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned).trim_start();
        let normalized = unsigned.replace(',', ".");

        let (major_str, minor_str) = match normalized.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (normalized.as_str(), ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (major_str.is_empty() && minor_str.is_empty())
            || !all_digits(major_str)
            || !all_digits(minor_str)
        {
            return Err(ValidationError::invalid_format(
                "price",
                format!("'{}' is not a number", input.trim()),
            ));
        }
        if minor_str.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "at most two decimal places",
            ));
        }

        let overflow = || ValidationError::invalid_format("price", "amount is too large");

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| overflow())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => minor_str.parse().map_err(|_| overflow())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use factura_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1250); // $12.50
    /// let line_total = unit_price.checked_multiply_quantity(2).unwrap();
    /// assert_eq!(line_total.cents(), 2500); // $25.00
    /// assert!(unit_price.checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums `amounts`, or `None` as soon as the running total overflows.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Formats the amount as a plain decimal without currency symbol
    /// (`"12.50"`), used where the symbol is rendered separately.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.50` (the invoice is denominated in USD).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
