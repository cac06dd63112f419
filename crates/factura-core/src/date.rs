//! # Invoice Dates
//!
//! A tiny token-substitution formatter for the date printed on an invoice.
//!
//! | Token  | Value                       | Example (2026-03-07) |
//! |--------|-----------------------------|----------------------|
//! | `dd`   | day of month, 2 digits      | `07`                 |
//! | `mm`   | month, 2 digits             | `03`                 |
//! | `yy`   | year, last 2 digits         | `26`                 |
//! | `yyyy` | year, 4 digits              | `2026`               |
//!
//! Tokens match case-insensitively and the longest token wins, so `yyyy`
//! is never read as two `yy`. Everything else is copied through.

use chrono::{Datelike, NaiveDate};

use crate::error::{ValidationError, ValidationResult};

/// Pattern used when no date is chosen for an invoice.
pub const DEFAULT_DATE_FORMAT: &str = "dd/mm/yy";

/// Pattern produced by an HTML `<input type="date">` picker.
const PICKER_FORMAT: &str = "%Y-%m-%d";

/// Formats `date` according to a `dd`/`mm`/`yy`/`yyyy` pattern.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use factura_core::date::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
/// assert_eq!(format_date(date, "dd/mm/yy"), "07/03/26");
/// assert_eq!(format_date(date, "YYYY-MM-DD"), "2026-03-07");
/// ```
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some((value, len)) = match_token(date, rest) {
            out.push_str(&value);
            rest = &rest[len..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Tries the tokens longest first at the start of `input`.
fn match_token(date: NaiveDate, input: &str) -> Option<(String, usize)> {
    let starts_with = |token: &str| {
        input
            .get(..token.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(token))
    };

    if starts_with("yyyy") {
        Some((format!("{:04}", date.year()), 4))
    } else if starts_with("yy") {
        Some((format!("{:02}", date.year().rem_euclid(100)), 2))
    } else if starts_with("dd") {
        Some((format!("{:02}", date.day()), 2))
    } else if starts_with("mm") {
        Some((format!("{:02}", date.month()), 2))
    } else {
        None
    }
}

/// Parses the value of the date picker (`YYYY-MM-DD`).
///
/// ## Example
/// ```rust
/// use factura_core::date::parse_picker_date;
///
/// assert!(parse_picker_date("2026-10-16").is_ok());
/// assert!(parse_picker_date("16/10/2026").is_err());
/// ```
pub fn parse_picker_date(value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required("date"));
    }

    NaiveDate::parse_from_str(value, PICKER_FORMAT)
        .map_err(|e| ValidationError::invalid_format("date", e.to_string()))
}
