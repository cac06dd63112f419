//! # Validation Module
//!
//! Field rules shared by the domain constructors.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (desktop commands)                                │
//! │  ├── Parse strings into typed values (price, qty, date)                │
//! │  └── Empty string → Required                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors (THIS MODULE)                            │
//! │  ├── Product: name, price, qty must be present and non-zero            │
//! │  ├── Customer: id card at least 3 characters                           │
//! │  └── Invoice: customer present, at least one product                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── PRIMARY KEY on customers.ci                                       │
//! │  └── Foreign key invoices.customer_ci → customers.ci                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MIN_ID_CARD_LEN;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer identity card (cédula).
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at least [`MIN_ID_CARD_LEN`] characters
///
/// Returns the trimmed value.
///
/// ## Example
/// ```rust
/// use factura_core::validation::validate_id_card;
///
/// assert_eq!(validate_id_card(" 1234 ").unwrap(), "1234");
/// assert!(validate_id_card("12").is_err());
/// assert!(validate_id_card("").is_err());
/// ```
pub fn validate_id_card(id_card: &str) -> ValidationResult<&str> {
    let id_card = id_card.trim();

    if id_card.is_empty() {
        return Err(ValidationError::required("id_card"));
    }

    if id_card.chars().count() < MIN_ID_CARD_LEN {
        return Err(ValidationError::TooShort {
            field: "id_card".to_string(),
            min: MIN_ID_CARD_LEN,
        });
    }

    Ok(id_card)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Zero counts as missing (`Required`), matching the form's
///   "all three fields are required" behavior
/// - Negative prices are rejected
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_zero() {
        return Err(ValidationError::required("price"));
    }

    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Zero counts as missing (`Required`)
/// - Negative quantities are rejected
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::required("qty"));
    }

    if qty < 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    Ok(())
}

/// Parses a quantity typed into the product form.
///
/// Empty input is `Required`; anything that is not an integer is
/// `InvalidFormat`. Range rules are left to [`validate_quantity`].
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required("qty"));
    }

    input.parse::<i64>().map_err(|_| {
        ValidationError::invalid_format("qty", format!("'{}' is not a whole number", input))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
