//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Insert-if-absent upsert (no update path for existing rows)
//! - Partial identity-card lookup for the autocomplete suggestion
//!
//! ## Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Partial ID Lookup                                    │
//! │                                                                         │
//! │  User types: "123"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  instr(ci, '123') > 0     (match anywhere, not prefix-anchored)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ customers                               │                           │
//! │  │ 4561239  | Maria Lopez                  │ ← MATCH (first row only)  │
//! │  │ 456789   | Pedro Rojas                  │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some(CustomerRecord)   or   None (no match is not an error)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use factura_core::{Customer, ValidationResult};

/// A stored customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Identity card (primary key).
    pub ci: String,
    /// Name as it was entered when the row was first inserted.
    pub full_name: String,
    /// RFC 3339 insertion timestamp.
    pub created_at: String,
}

impl CustomerRecord {
    /// Rebuilds the domain value, e.g. to autofill the customer form.
    pub fn to_customer(&self) -> ValidationResult<Customer> {
        Customer::new(self.full_name.clone(), &self.ci)
    }
}

/// Result of [`CustomerRepository::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpsertOutcome {
    /// A new row was written.
    Inserted,
    /// A row with the same identity card already existed; nothing changed.
    AlreadyExists,
}

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let outcome = repo.upsert(&customer).await?;
/// let suggestion = repo.find_suggestion("123").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Stores `customer` unless a row with the same identity card exists.
    ///
    /// An existing row is left untouched (the stored name is not updated)
    /// and reported as [`UpsertOutcome::AlreadyExists`]; that is logged, not
    /// an error. Calling this twice for one identity card leaves exactly one
    /// row.
    pub async fn upsert(&self, customer: &Customer) -> DbResult<UpsertOutcome> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO customers (ci, full_name, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(ci) DO NOTHING
            "#,
        )
        .bind(customer.id_card())
        .bind(customer.name())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            info!(id_card = %customer.id_card(), "Customer already exists, skipping insert");
            Ok(UpsertOutcome::AlreadyExists)
        } else {
            info!(id_card = %customer.id_card(), "Customer inserted");
            Ok(UpsertOutcome::Inserted)
        }
    }

    /// Finds one customer whose identity card contains `fragment`.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - First match, ordered by identity card
    /// * `Ok(None)` - No match, or a blank fragment (no query is run)
    /// * `Err(DbError)` - The query itself failed
    pub async fn find_suggestion(&self, fragment: &str) -> DbResult<Option<CustomerRecord>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(None);
        }

        debug!(fragment = %fragment, "Looking up customer suggestion");

        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT ci, full_name, created_at
            FROM customers
            WHERE instr(ci, ?1) > 0
            ORDER BY ci
            LIMIT 1
            "#,
        )
        .bind(fragment)
        .fetch_optional(&self.pool)
        .await?;

        debug!(found = record.is_some(), "Customer lookup finished");
        Ok(record)
    }

    /// Gets a customer by exact identity card.
    pub async fn get_by_ci(&self, ci: &str) -> DbResult<Option<CustomerRecord>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            "SELECT ci, full_name, created_at FROM customers WHERE ci = ?1",
        )
        .bind(ci)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Total stored customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
