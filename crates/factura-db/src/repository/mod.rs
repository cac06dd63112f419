//! # Repository Module
//!
//! Database repositories for customers and invoices.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Desktop command                                                       │
//! │       │                                                                 │
//! │       │  db.customers().find_suggestion("123")                         │
//! │       ▼                                                                 │
//! │  CustomerRepository                 InvoiceRepository                  │
//! │  ├── upsert(&customer)              ├── insert(&invoice)               │
//! │  ├── find_suggestion(fragment)      ├── list_by_customer(ci)           │
//! │  ├── get_by_ci(ci)                  └── count()                        │
//! │  └── count()                                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Upsert and partial-id lookup
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Append-only invoice log

pub mod customer;
pub mod invoice;
