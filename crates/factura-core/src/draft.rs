//! # Product Draft List
//!
//! The ordered, mutable set of products of the invoice being built.
//!
//! ## Draft Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft List Operations                                │
//! │                                                                         │
//! │  "Add product" form ─────► add(product) ─────────► items.push(product)  │
//! │                                                                         │
//! │  Row "Delete" button ────► remove_by_id(id) ─────► items.remove(i)      │
//! │                                                  (no-op if absent)      │
//! │                                                                         │
//! │  Menu "Clear products" ──► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Running total ──────────► total() ──────────────► Σ price × qty        │
//! │                            (recomputed every call, never cached)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list knows nothing about rendering. Callers take a [`DraftSnapshot`]
//! after each mutation and hand it to whatever view needs refreshing.

use serde::Serialize;
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::money::Money;
use crate::types::{products_total, Product};

/// Products of the current draft, in insertion order.
///
/// ## Invariants
/// - Ids are unique: products get a UUID v4 at construction
/// - Order is insertion order, preserved through deletions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraftList {
    items: Vec<Product>,
}

impl ProductDraftList {
    /// Creates an empty draft list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a product at the end of the list.
    ///
    /// Fails with `TooLarge`, leaving the list untouched, when the running
    /// total would leave the money range.
    pub fn add(&mut self, product: Product) -> ValidationResult<()> {
        products_total(self.items.iter().chain(std::iter::once(&product)))?;
        self.items.push(product);
        Ok(())
    }

    /// Removes the product with the given id.
    ///
    /// Returns the removed product, or `None` (and leaves the list
    /// untouched) when no product has that id.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Removes every product.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Running total (`Σ price × qty`), recomputed on every call.
    pub fn total(&self) -> Money {
        // `add` keeps the sum in range; removals only shrink it.
        products_total(&self.items).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.items
    }

    /// Copies the current products, e.g. to freeze them into an invoice.
    pub fn to_vec(&self) -> Vec<Product> {
        self.items.clone()
    }

    /// Captures the list and its total for rendering.
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            items: self.to_vec(),
            total: self.total(),
        }
    }
}

impl<'a> IntoIterator for &'a ProductDraftList {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Point-in-time view of a draft list: what the product table shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub items: Vec<Product>,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn product(name: &str, cents: i64, qty: i64) -> Product {
        Product::new(name, Money::from_cents(cents), qty).unwrap()
    }

    fn names(list: &ProductDraftList) -> Vec<&str> {
        list.iter().map(Product::name).collect()
    }

    #[test]
    fn test_total_scenario_with_removal() {
        let mut draft = ProductDraftList::new();
        let oil_filter = product("Oil Filter", 1250, 2);
        let oil_filter_id = oil_filter.id().to_string();
        draft.add(oil_filter).unwrap();
        draft.add(product("Brake Pad", 800, 1)).unwrap();

        assert_eq!(draft.total(), Money::from_cents(3300));

        let removed = draft.remove_by_id(&oil_filter_id).unwrap();
        assert_eq!(removed.name(), "Oil Filter");
        assert_eq!(draft.total(), Money::from_cents(800));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut draft = ProductDraftList::new();
        draft.add(product("Chain", 2000, 1)).unwrap();

        assert!(draft.remove_by_id("missing").is_none());
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_remove_only_the_matching_duplicate() {
        let mut draft = ProductDraftList::new();
        let first = product("Spark Plug", 300, 4);
        let second = product("Spark Plug", 300, 4);
        let second_id = second.id().to_string();
        draft.add(first.clone()).unwrap();
        draft.add(second).unwrap();

        draft.remove_by_id(&second_id);

        assert_eq!(draft.as_slice(), &[first]);
    }

    #[test]
    fn test_insertion_order_survives_deletions() {
        let mut draft = ProductDraftList::new();
        let items: Vec<Product> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| product(n, 100, 1))
            .collect();
        for item in &items {
            draft.add(item.clone()).unwrap();
        }

        draft.remove_by_id(items[1].id());
        draft.add(product("E", 100, 1)).unwrap();
        draft.remove_by_id(items[0].id());

        assert_eq!(names(&draft), vec!["C", "D", "E"]);
    }

    #[test]
    fn test_clear_and_empty_total() {
        let mut draft = ProductDraftList::new();
        draft.add(product("Chain", 2000, 1)).unwrap();
        draft.clear();

        assert!(draft.is_empty());
        assert!(draft.total().is_zero());
    }

    #[test]
    fn test_add_rejects_total_out_of_range() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let mut draft = ProductDraftList::new();
        draft.add(product("Big", half.cents(), 1)).unwrap();

        assert_eq!(
            draft.add(product("Big", half.cents(), 1)).unwrap_err(),
            ValidationError::too_large("total")
        );
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.total(), half);
    }

    #[test]
    fn test_snapshot_matches_list() {
        let mut draft = ProductDraftList::new();
        draft.add(product("Oil Filter", 1250, 2)).unwrap();
        let snapshot = draft.snapshot();

        assert_eq!(snapshot.items, draft.to_vec());
        assert_eq!(snapshot.total, Money::from_cents(2500));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total"], 2500);
        assert_eq!(json["items"][0]["qty"], 2);
    }
}
