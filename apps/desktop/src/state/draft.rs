//! # Draft State
//!
//! The invoice being built: its products, the chosen date and the current
//! customer suggestion.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>`: several commands touch it, and
//! only one may change it at a time. The lock is never held across an
//! `.await`; async commands copy what they need out first.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Frontend Action          Command                 Draft Change          │
//! │  ───────────────          ───────                 ────────────          │
//! │                                                                         │
//! │  Submit product form ────► add_product() ───────► products.add(p)       │
//! │                                                                         │
//! │  Click row "Delete" ─────► remove_product() ────► products.remove(id)   │
//! │                                                                         │
//! │  Pick a date ────────────► set_date() ──────────► date = Some(d)        │
//! │                                                                         │
//! │  Type identity card ─────► lookup_customer() ───► suggestion = hit      │
//! │                                                                         │
//! │  Menu "Clear products" ──► clear_products() ────► products.clear()      │
//! │                                                                         │
//! │  Every product change ──► watch channel ────────► DraftSnapshot         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::watch;

use factura_core::{Customer, DraftSnapshot, ProductDraftList, ValidationResult};
use factura_db::CustomerRecord;

/// A stored customer offered for one-click autofill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSuggestion {
    pub full_name: String,
    pub id_card: String,
}

impl CustomerSuggestion {
    /// Customer value for the form, with the display name normalized.
    pub fn to_customer(&self) -> ValidationResult<Customer> {
        Customer::new(self.full_name.clone(), &self.id_card)
    }
}

impl From<CustomerRecord> for CustomerSuggestion {
    fn from(record: CustomerRecord) -> Self {
        CustomerSuggestion {
            full_name: record.full_name,
            id_card: record.ci,
        }
    }
}

/// Everything the drafting screen holds between commands.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDraft {
    pub products: ProductDraftList,
    /// Chosen invoice date; `None` prints today's date.
    pub date: Option<NaiveDate>,
    /// Last lookup hit; cleared on a miss.
    pub suggestion: Option<CustomerSuggestion>,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to an empty draft (menu "New invoice").
    pub fn reset(&mut self) {
        *self = InvoiceDraft::default();
    }
}

/// Session-owned draft plus a change channel for the product table.
///
/// Subscribers receive a fresh [`DraftSnapshot`] whenever a mutation
/// changes the products; the view renders from the snapshot alone.
#[derive(Debug)]
pub struct DraftState {
    draft: Arc<Mutex<InvoiceDraft>>,
    changes: watch::Sender<DraftSnapshot>,
}

impl DraftState {
    /// Creates an empty draft.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(DraftSnapshot::default());
        DraftState {
            draft: Arc::new(Mutex::new(InvoiceDraft::new())),
            changes,
        }
    }

    /// Subscribes to product table changes.
    ///
    /// The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DraftSnapshot> {
        self.changes.subscribe()
    }

    /// Executes a function with read access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = draft_state.with_draft(|d| d.products.snapshot());
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceDraft) -> R,
    {
        let draft = self.lock();
        f(&draft)
    }

    /// Executes a function with write access to the draft, then publishes
    /// the resulting snapshot if the products changed.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// draft_state.with_draft_mut(|d| d.products.add(product))?;
    /// ```
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceDraft) -> R,
    {
        let (result, snapshot) = {
            let mut draft = self.lock();
            let result = f(&mut draft);
            (result, draft.products.snapshot())
        };

        self.changes.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });

        result
    }

    /// Current products and total.
    pub fn snapshot(&self) -> DraftSnapshot {
        self.with_draft(|d| d.products.snapshot())
    }

    fn lock(&self) -> MutexGuard<'_, InvoiceDraft> {
        // A panic inside a closure leaves the draft itself consistent:
        // every mutation is a single Vec/Option operation.
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_core::{Money, Product};

    fn product(name: &str, cents: i64, qty: i64) -> Product {
        Product::new(name, Money::from_cents(cents), qty).unwrap()
    }

    #[test]
    fn test_mutation_publishes_snapshot() {
        let state = DraftState::new();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state
            .with_draft_mut(|d| d.products.add(product("Oil Filter", 1250, 2)))
            .unwrap();

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.total, Money::from_cents(2500));
        assert_eq!(seen, state.snapshot());
    }

    #[test]
    fn test_date_change_does_not_notify_product_table() {
        let state = DraftState::new();
        let mut rx = state.subscribe();

        state.with_draft_mut(|d| d.date = NaiveDate::from_ymd_opt(2026, 10, 16));

        assert!(!rx.has_changed().unwrap());
        assert!(state.with_draft(|d| d.date.is_some()));
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = DraftState::new();
        state.with_draft_mut(|d| {
            d.products.add(product("Chain", 2000, 1)).unwrap();
            d.date = NaiveDate::from_ymd_opt(2026, 1, 1);
            d.suggestion = Some(CustomerSuggestion {
                full_name: "juan perez".into(),
                id_card: "1234".into(),
            });
        });

        state.with_draft_mut(InvoiceDraft::reset);

        state.with_draft(|d| {
            assert!(d.products.is_empty());
            assert!(d.date.is_none());
            assert!(d.suggestion.is_none());
        });
    }

    #[test]
    fn test_suggestion_normalizes_name() {
        let suggestion = CustomerSuggestion {
            full_name: "maria lopez".into(),
            id_card: "4561239".into(),
        };
        assert_eq!(suggestion.to_customer().unwrap().client_name(), "Maria lopez");
    }
}
