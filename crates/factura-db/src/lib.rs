//! # factura-db: Persistence Gateway for Factura
//!
//! Durable storage for customers and invoices, on SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Factura Data Flow                                │
//! │                                                                         │
//! │  create_order (desktop)          lookup_customer (desktop)             │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    factura-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │◄───│ CustomerRepository │  │            │  │   │
//! │  │   │ SqlitePool    │    │ InvoiceRepository  │  │ 001_init   │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir)/factura.db                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - Customer and invoice repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use factura_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("factura.db")).await?;
//! db.customers().upsert(&customer).await?;
//! db.invoices().insert(&invoice).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::{CustomerRecord, CustomerRepository, UpsertOutcome};
pub use repository::invoice::{InvoiceRecord, InvoiceRepository};
