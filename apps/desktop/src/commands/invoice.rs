//! # Invoice Commands
//!
//! The "create order" action and the per-customer invoice history.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_order                                         │
//! │                                                                         │
//! │  1. CustomerForm ──► Customer        (ValidationError → stop)           │
//! │  2. Draft products + date ──► Invoice (ValidationError → stop)          │
//! │  3. render_invoice ──► InvoiceSink   (printable document)               │
//! │  4. save requested?                                                     │
//! │       ├── no  ──► PersistenceOutcome::Skipped                           │
//! │       └── yes ──► upsert customer ──► insert invoice                    │
//! │                     │                    │                              │
//! │                     └──── any DbError ───┴──► logged, Failed            │
//! │                           (document from step 3 stands)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft is left as it was; the menu's "New invoice" starts over.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::commands::customer::CustomerForm;
use crate::error::ApiResult;
use crate::render::{render_invoice, InvoiceSink};
use crate::state::{ConfigState, DbState, DraftState};
use factura_core::{Invoice, Money};
use factura_db::{Database, InvoiceRecord, UpsertOutcome};

/// Input of the "create order" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer: CustomerForm,
    /// The "save" checkbox: store the customer and invoice.
    pub save: bool,
}

/// What happened to the invoice on the storage side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PersistenceOutcome {
    /// Saving was not requested.
    Skipped,
    /// Customer upserted and invoice row appended.
    Saved { customer: UpsertOutcome },
    /// Storage failed; the error was logged and nothing was retried.
    Failed { message: String },
}

/// Result of a successful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub invoice_id: String,
    pub date: String,
    pub total: Money,
    /// Where the rendered document went (file path or sink specific).
    pub document: String,
    pub persistence: PersistenceOutcome,
}

/// Builds, renders and (optionally) stores an invoice from the draft.
///
/// ## Errors
/// - Validation: bad identity card, no products (nothing rendered or stored)
/// - Render: the sink could not take the document (nothing stored)
///
/// Storage failures are not errors here; they are reported in
/// [`OrderResponse::persistence`].
pub async fn create_order(
    db: &DbState,
    draft: &DraftState,
    config: &ConfigState,
    sink: &dyn InvoiceSink,
    request: OrderRequest,
) -> ApiResult<OrderResponse> {
    debug!(
        id_card = %request.customer.id_card,
        save = request.save,
        "create_order command"
    );

    let customer = request.customer.to_customer()?;
    let (products, date) = draft.with_draft(|d| (d.products.to_vec(), d.date));

    let invoice = Invoice::builder()
        .customer(customer)
        .products(products)
        .date(date)
        .date_format(config.date_format.clone())
        .build()?;

    let html = render_invoice(&invoice, config);
    let document = sink.emit(&invoice, &html)?;

    info!(
        invoice_id = %invoice.id(),
        total = %invoice.total(),
        lines = invoice.products().len(),
        "Invoice rendered"
    );

    let persistence = if request.save {
        persist_invoice(db.inner(), &invoice).await
    } else {
        PersistenceOutcome::Skipped
    };

    Ok(OrderResponse {
        invoice_id: invoice.id().to_string(),
        date: invoice.date().to_string(),
        total: invoice.total(),
        document,
        persistence,
    })
}

/// Upserts the customer, then appends the invoice. Errors are logged and
/// turned into [`PersistenceOutcome::Failed`].
async fn persist_invoice(db: &Database, invoice: &Invoice) -> PersistenceOutcome {
    let customer = match db.customers().upsert(invoice.customer()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(
                error = %e,
                id_card = %invoice.customer_id_card(),
                "Failed to store customer"
            );
            return PersistenceOutcome::Failed {
                message: e.to_string(),
            };
        }
    };

    if let Err(e) = db.invoices().insert(invoice).await {
        error!(error = %e, invoice_id = %invoice.id(), "Failed to store invoice");
        return PersistenceOutcome::Failed {
            message: e.to_string(),
        };
    }

    PersistenceOutcome::Saved { customer }
}

/// Stored invoices of the customer with identity card `ci`.
pub async fn list_invoices(db: &DbState, ci: &str) -> ApiResult<Vec<InvoiceRecord>> {
    debug!(id_card = %ci, "list_invoices command");
    Ok(db.inner().invoices().list_by_customer(ci.trim()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, remove_product, set_date, ProductForm};
    use crate::error::ErrorCode;
    use crate::render::RecordingSink;
    use factura_db::DbConfig;

    async fn session() -> (DbState, DraftState, ConfigState, RecordingSink) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            DbState::new(db),
            DraftState::new(),
            ConfigState::default(),
            RecordingSink::new(),
        )
    }

    fn order(name: &str, ci: &str, save: bool) -> OrderRequest {
        OrderRequest {
            customer: CustomerForm::new(name, ci),
            save,
        }
    }

    fn fill_draft(draft: &DraftState) {
        add_product(draft, ProductForm::new("Oil Filter", "12.50", "2")).unwrap();
        add_product(draft, ProductForm::new("Brake Pad", "8.00", "1")).unwrap();
    }

    #[tokio::test]
    async fn test_order_renders_and_saves() {
        let (db, draft, config, sink) = session().await;
        fill_draft(&draft);
        set_date(&draft, "2026-10-16").unwrap();

        let response = create_order(&db, &draft, &config, &sink, order("juan perez", "1234", true))
            .await
            .unwrap();

        assert_eq!(response.total, Money::from_cents(3300));
        assert_eq!(response.date, "16/10/26");
        assert_eq!(
            response.persistence,
            PersistenceOutcome::Saved {
                customer: UpsertOutcome::Inserted
            }
        );

        let documents = sink.documents();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].html.contains("Juan perez"));
        assert!(documents[0].html.contains("Total USD: $33.00"));

        let stored = list_invoices(&db, "1234").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, response.invoice_id);
        assert_eq!(stored[0].total_cents, 3300);
    }

    #[tokio::test]
    async fn test_order_without_save_touches_no_storage() {
        let (db, draft, config, sink) = session().await;
        fill_draft(&draft);

        let response = create_order(&db, &draft, &config, &sink, order("juan perez", "1234", false))
            .await
            .unwrap();

        assert_eq!(response.persistence, PersistenceOutcome::Skipped);
        assert_eq!(db.inner().customers().count().await.unwrap(), 0);
        assert_eq!(db.inner().invoices().count().await.unwrap(), 0);
        assert_eq!(sink.documents().len(), 1);
    }

    #[tokio::test]
    async fn test_repeat_customer_is_not_duplicated() {
        let (db, draft, config, sink) = session().await;
        fill_draft(&draft);

        create_order(&db, &draft, &config, &sink, order("juan perez", "1234", true))
            .await
            .unwrap();
        let second = create_order(&db, &draft, &config, &sink, order("juan perez", "1234", true))
            .await
            .unwrap();

        assert_eq!(
            second.persistence,
            PersistenceOutcome::Saved {
                customer: UpsertOutcome::AlreadyExists
            }
        );
        assert_eq!(db.inner().customers().count().await.unwrap(), 1);
        assert_eq!(list_invoices(&db, "1234").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_short_id_card_stops_before_rendering() {
        let (db, draft, config, sink) = session().await;
        fill_draft(&draft);
        let before = draft.snapshot();

        let err = create_order(&db, &draft, &config, &sink, order("juan perez", "12", true))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cédula es requerido");
        assert!(sink.documents().is_empty());
        assert_eq!(draft.snapshot(), before);
        assert_eq!(db.inner().customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected() {
        let (db, draft, config, sink) = session().await;

        let err = create_order(&db, &draft, &config, &sink, order("juan perez", "1234", true))
            .await
            .unwrap_err();

        assert_eq!(err.message, "Cliente y productos son requeridos");
        assert!(sink.documents().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_swallowed() {
        let (db, draft, config, sink) = session().await;
        fill_draft(&draft);
        db.inner().close().await;

        let response = create_order(&db, &draft, &config, &sink, order("juan perez", "1234", true))
            .await
            .unwrap();

        assert!(matches!(
            response.persistence,
            PersistenceOutcome::Failed { .. }
        ));
        assert_eq!(sink.documents().len(), 1);
        assert_eq!(draft.snapshot().items.len(), 2);
    }

    #[tokio::test]
    async fn test_stored_blob_follows_draft_order() {
        let (db, draft, config, sink) = session().await;
        let first = add_product(&draft, ProductForm::new("Alpha", "1", "1")).unwrap();
        add_product(&draft, ProductForm::new("Bravo", "2", "1")).unwrap();
        add_product(&draft, ProductForm::new("Charlie", "3", "1")).unwrap();
        remove_product(&draft, first.items[0].id());

        create_order(&db, &draft, &config, &sink, order("ana", "9876", true))
            .await
            .unwrap();

        let stored = list_invoices(&db, "9876").await.unwrap();
        assert_eq!(
            stored[0].products,
            "Bravo | qty: 1 | unit: $2.00\nCharlie | qty: 1 | unit: $3.00\nTotal: $5.00"
        );
    }

    #[test]
    fn test_persistence_outcome_json() {
        let json = serde_json::to_value(PersistenceOutcome::Saved {
            customer: UpsertOutcome::AlreadyExists,
        })
        .unwrap();
        assert_eq!(json["status"], "saved");
        assert_eq!(json["customer"], "alreadyExists");
    }
}
