//! # Customer Commands
//!
//! Identity-card autocomplete for the customer fields.
//!
//! ## Lookup Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types in "Cédula"                                                │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  lookup_customer(fragment)                                             │
//! │                    │                                                    │
//! │       ┌────────────┼─────────────────────┐                             │
//! │       ▼            ▼                     ▼                             │
//! │    match        no match             query failed                      │
//! │  suggestion =  suggestion = None    suggestion = None                  │
//! │  Some(hit)     Ok(None)             Err(ApiError)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  User clicks the suggestion ──► accept_suggestion() ──► form values    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{CustomerSuggestion, DbState, DraftState};
use factura_core::Customer;

/// Raw values of the customer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    pub name: String,
    pub id_card: String,
}

impl CustomerForm {
    pub fn new(name: impl Into<String>, id_card: impl Into<String>) -> Self {
        CustomerForm {
            name: name.into(),
            id_card: id_card.into(),
        }
    }

    /// Builds the customer; a short or empty identity card is rejected.
    pub fn to_customer(&self) -> ApiResult<Customer> {
        Ok(Customer::new(self.name.clone(), &self.id_card)?)
    }
}

/// Looks up a stored customer whose identity card contains `fragment`.
///
/// ## Behavior
/// - Match: the hit becomes the session suggestion and is returned
/// - No match (or blank fragment): any previous suggestion is cleared,
///   `Ok(None)`
/// - Query failure: the previous suggestion is cleared as well, and the
///   error is returned
pub async fn lookup_customer(
    db: &DbState,
    draft: &DraftState,
    fragment: &str,
) -> ApiResult<Option<CustomerSuggestion>> {
    debug!(fragment = %fragment, "lookup_customer command");

    let result = db.inner().customers().find_suggestion(fragment).await;

    let suggestion = match result {
        Ok(hit) => hit.map(CustomerSuggestion::from),
        Err(e) => {
            warn!(error = %e, "Customer lookup failed");
            draft.with_draft_mut(|d| d.suggestion = None);
            return Err(e.into());
        }
    };

    draft.with_draft_mut(|d| d.suggestion = suggestion.clone());
    Ok(suggestion)
}

/// Returns the current suggestion as form values (one-click autofill).
///
/// The name comes back capitalized, as it will be printed.
pub fn accept_suggestion(draft: &DraftState) -> ApiResult<CustomerForm> {
    debug!("accept_suggestion command");

    let suggestion = draft
        .with_draft(|d| d.suggestion.clone())
        .ok_or_else(|| ApiError::not_found("Sugerencia", "cliente"))?;

    let customer = suggestion.to_customer()?;
    Ok(CustomerForm::new(customer.client_name(), customer.id_card()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use factura_db::{Database, DbConfig};

    async fn db_with(customers: &[(&str, &str)]) -> DbState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (name, ci) in customers {
            db.customers()
                .upsert(&Customer::new(*name, ci).unwrap())
                .await
                .unwrap();
        }
        DbState::new(db)
    }

    #[tokio::test]
    async fn test_match_sets_suggestion() {
        let db = db_with(&[("maria lopez", "4561239")]).await;
        let draft = DraftState::new();

        let hit = lookup_customer(&db, &draft, "123").await.unwrap().unwrap();

        assert_eq!(hit.id_card, "4561239");
        assert_eq!(draft.with_draft(|d| d.suggestion.clone()), Some(hit));
    }

    #[tokio::test]
    async fn test_miss_clears_previous_suggestion() {
        let db = db_with(&[("pedro rojas", "456789")]).await;
        let draft = DraftState::new();
        draft.with_draft_mut(|d| {
            d.suggestion = Some(CustomerSuggestion {
                full_name: "stale".into(),
                id_card: "999".into(),
            })
        });

        let result = lookup_customer(&db, &draft, "123").await.unwrap();

        assert_eq!(result, None);
        assert!(draft.with_draft(|d| d.suggestion.is_none()));
    }

    #[tokio::test]
    async fn test_failure_is_an_error_and_clears_suggestion() {
        let db = db_with(&[("maria lopez", "4561239")]).await;
        let draft = DraftState::new();
        lookup_customer(&db, &draft, "123").await.unwrap();

        db.inner().close().await;
        let err = lookup_customer(&db, &draft, "123").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(draft.with_draft(|d| d.suggestion.is_none()));
    }

    #[tokio::test]
    async fn test_accept_suggestion_fills_form() {
        let db = db_with(&[("maria lopez", "4561239")]).await;
        let draft = DraftState::new();

        assert_eq!(
            accept_suggestion(&draft).unwrap_err().code,
            ErrorCode::NotFound
        );

        lookup_customer(&db, &draft, "4561").await.unwrap();
        let form = accept_suggestion(&draft).unwrap();

        assert_eq!(form, CustomerForm::new("Maria lopez", "4561239"));
    }

    #[test]
    fn test_customer_form_validation() {
        let err = CustomerForm::new("juan perez", "12").to_customer().unwrap_err();
        assert_eq!(err.message, "Cédula es requerido");

        let customer = CustomerForm::new("juan perez", "1234").to_customer().unwrap();
        assert_eq!(customer.client_name(), "Juan perez");
    }
}
