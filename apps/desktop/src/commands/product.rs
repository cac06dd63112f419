//! # Product Commands
//!
//! Commands behind the new-product form, the row delete buttons and the
//! date picker.
//!
//! ## Drafting Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌──────────┐   │
//! │  │  Empty   │────►│ Products │────►│ create_order │────►│ Printed  │   │
//! │  │  Draft   │     │  listed  │     │ (invoice.rs) │     │ (saved?) │   │
//! │  └──────────┘     └──────────┘     └──────────────┘     └──────────┘   │
//! │                        │                                                │
//! │                   add_product                                           │
//! │                   remove_product                                        │
//! │                   set_date                                              │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   menu: clear / new invoice ──────────►                 │
//! │                                                     (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{CustomerSuggestion, DraftState};
use factura_core::{
    format_date, parse_picker_date, validation::parse_quantity, DraftSnapshot, Money, Product,
    DEFAULT_DATE_FORMAT,
};

/// Raw values of the new-product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub qty: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        qty: impl Into<String>,
    ) -> Self {
        ProductForm {
            name: name.into(),
            price: price.into(),
            qty: qty.into(),
        }
    }

    /// Parses a `NAME:PRICE:QTY` triple; the name may itself contain `:`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let form = ProductForm::from_triple("Oil Filter:12.50:2")?;
    /// ```
    pub fn from_triple(value: &str) -> ApiResult<Self> {
        let mut parts = value.rsplitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(qty), Some(price), Some(name)) => Ok(ProductForm::new(name, price, qty)),
            _ => Err(ApiError::validation(format!(
                "Producto inválido '{}': use NOMBRE:PRECIO:CANTIDAD",
                value
            ))),
        }
    }

    /// Builds the product; any empty field is `Required`.
    pub fn into_product(self) -> ApiResult<Product> {
        let price = Money::parse(&self.price)?;
        let qty = parse_quantity(&self.qty)?;
        Ok(Product::new(self.name, price, qty)?)
    }
}

/// Full drafting view: products, total, date and suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    #[serde(flatten)]
    pub snapshot: DraftSnapshot,
    /// Chosen date as `dd/mm/yy`; `None` means the invoice is dated today.
    pub date: Option<String>,
    pub suggestion: Option<CustomerSuggestion>,
}

/// Adds a product from the form to the draft.
///
/// ## Behavior
/// - Validation happens before the draft is touched; a rejected form
///   leaves the draft exactly as it was
/// - Products with the same name are separate rows
///
/// ## Returns
/// The new snapshot (also published to subscribers)
pub fn add_product(draft: &DraftState, form: ProductForm) -> ApiResult<DraftSnapshot> {
    debug!(name = %form.name, price = %form.price, qty = %form.qty, "add_product command");

    let product = form.into_product()?;

    draft.with_draft_mut(|d| {
        d.products.add(product)?;
        Ok::<_, ApiError>(d.products.snapshot())
    })
}

/// Removes the row with `product_id`; unknown ids are ignored.
pub fn remove_product(draft: &DraftState, product_id: &str) -> DraftSnapshot {
    debug!(product_id = %product_id, "remove_product command");

    draft.with_draft_mut(|d| {
        if d.products.remove_by_id(product_id).is_none() {
            debug!(product_id = %product_id, "No product with that id");
        }
        d.products.snapshot()
    })
}

/// Current drafting view.
pub fn get_draft(draft: &DraftState) -> DraftResponse {
    debug!("get_draft command");

    draft.with_draft(|d| DraftResponse {
        snapshot: d.products.snapshot(),
        date: d.date.map(|date| format_date(date, DEFAULT_DATE_FORMAT)),
        suggestion: d.suggestion.clone(),
    })
}

/// Sets the invoice date from the picker (`YYYY-MM-DD`).
///
/// An empty value clears the choice, so the invoice is dated today.
pub fn set_date(draft: &DraftState, value: &str) -> ApiResult<DraftResponse> {
    debug!(value = %value, "set_date command");

    let date = if value.trim().is_empty() {
        None
    } else {
        Some(parse_picker_date(value)?)
    };

    draft.with_draft_mut(|d| d.date = date);
    Ok(get_draft(draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_and_remove_scenario() {
        let draft = DraftState::new();

        let snapshot = add_product(&draft, ProductForm::new("Oil Filter", "12.50", "2")).unwrap();
        let oil_filter_id = snapshot.items[0].id().to_string();
        let snapshot = add_product(&draft, ProductForm::new("Brake Pad", "8", "1")).unwrap();
        assert_eq!(snapshot.total, Money::from_cents(3300));

        let snapshot = remove_product(&draft, &oil_filter_id);
        assert_eq!(snapshot.total, Money::from_cents(800));
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_rejected_form_leaves_draft_untouched() {
        let draft = DraftState::new();
        add_product(&draft, ProductForm::new("Chain", "20", "1")).unwrap();
        let before = draft.snapshot();

        for form in [
            ProductForm::new("", "20", "1"),
            ProductForm::new("Chain", "", "1"),
            ProductForm::new("Chain", "20", ""),
            ProductForm::new("Chain", "0", "1"),
        ] {
            let err = add_product(&draft, form).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert_eq!(err.message, "Nombre, precio, y cantidad es requerido");
        }

        assert!(add_product(&draft, ProductForm::new("Chain", "abc", "1")).is_err());
        assert!(add_product(&draft, ProductForm::new("Chain", "-5", "1")).is_err());
        assert_eq!(draft.snapshot(), before);
    }

    #[test]
    fn test_amounts_out_of_range_are_rejected() {
        let draft = DraftState::new();

        let err = add_product(&draft, ProductForm::new("Part", "1000000", "1000000000000"))
            .unwrap_err();
        assert_eq!(err.message, "Monto demasiado grande");
        assert!(draft.snapshot().items.is_empty());

        let half_max = format!("{}", (i64::MAX / 2 + 1) / 100 + 1);
        add_product(&draft, ProductForm::new("Big", &half_max, "1")).unwrap();
        let before = draft.snapshot();

        let err = add_product(&draft, ProductForm::new("Big", &half_max, "1")).unwrap_err();
        assert_eq!(err.message, "Monto demasiado grande");
        assert_eq!(draft.snapshot(), before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let draft = DraftState::new();
        add_product(&draft, ProductForm::new("Chain", "20", "1")).unwrap();

        let snapshot = remove_product(&draft, "not-an-id");
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let draft = DraftState::new();
        let mut rx = draft.subscribe();

        let snapshot = add_product(&draft, ProductForm::new("Chain", "20", "2")).unwrap();
        assert_eq!(*rx.borrow_and_update(), snapshot);

        let id = snapshot.items[0].id().to_string();
        remove_product(&draft, &id);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().items.is_empty());
    }

    #[test]
    fn test_set_date_and_clear() {
        let draft = DraftState::new();

        let view = set_date(&draft, "2026-10-16").unwrap();
        assert_eq!(view.date.as_deref(), Some("16/10/26"));

        let view = set_date(&draft, "").unwrap();
        assert_eq!(view.date, None);

        let err = set_date(&draft, "16/10/2026").unwrap_err();
        assert_eq!(err.message, "Fecha inválida");
    }

    #[test]
    fn test_form_from_triple() {
        assert_eq!(
            ProductForm::from_triple("Oil Filter:12.50:2").unwrap(),
            ProductForm::new("Oil Filter", "12.50", "2")
        );
        assert_eq!(
            ProductForm::from_triple("Kit 3:1:4.00:1").unwrap().name,
            "Kit 3:1"
        );
        assert!(ProductForm::from_triple("Chain:20").is_err());
    }

    #[test]
    fn test_draft_response_json_shape() {
        let draft = DraftState::new();
        add_product(&draft, ProductForm::new("Chain", "20", "1")).unwrap();

        let json = serde_json::to_value(get_draft(&draft)).unwrap();
        assert_eq!(json["total"], 2000);
        assert_eq!(json["items"][0]["name"], "Chain");
        assert!(json["suggestion"].is_null());
    }
}
