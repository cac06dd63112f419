//! # Invoice Repository
//!
//! Append-only invoice log. Rows are written once and never updated.
//!
//! The line items are stored as the human-readable text produced by
//! [`Invoice::products_summary`]; nothing reads them back into products.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use factura_core::{Invoice, Money};

/// A stored invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    /// Date as printed on the invoice (`dd/mm/yy`).
    pub date: String,
    /// Line items text blob.
    pub products: String,
    pub total_cents: i64,
    pub customer_ci: String,
    pub created_at: String,
}

impl InvoiceRecord {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Appends `invoice` as one row.
    ///
    /// The customer row must already exist (foreign key); callers upsert
    /// the customer first.
    ///
    /// ## Returns
    /// * `Ok(())` - Row written
    /// * `Err(DbError::ForeignKeyViolation)` - Customer not stored
    /// * `Err(DbError::UniqueViolation)` - Invoice id already stored
    pub async fn insert(&self, invoice: &Invoice) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO invoices (id, date, products, total_cents, customer_ci, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(invoice.id())
        .bind(invoice.date())
        .bind(invoice.products_summary())
        .bind(invoice.total().cents())
        .bind(invoice.customer_id_card())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        info!(
            invoice_id = %invoice.id(),
            id_card = %invoice.customer_id_card(),
            total = %invoice.total(),
            "Invoice stored"
        );
        Ok(())
    }

    /// Invoices of one customer, oldest first.
    pub async fn list_by_customer(&self, ci: &str) -> DbResult<Vec<InvoiceRecord>> {
        let records = sqlx::query_as::<_, InvoiceRecord>(
            r#"
            SELECT id, date, products, total_cents, customer_ci, created_at
            FROM invoices
            WHERE customer_ci = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(ci)
        .fetch_all(&self.pool)
        .await?;

        debug!(id_card = %ci, count = records.len(), "Listed customer invoices");
        Ok(records)
    }

    /// Total stored invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
