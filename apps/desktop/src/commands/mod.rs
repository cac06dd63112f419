//! # Commands Module
//!
//! Every action the drafting screen and the menu can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── add/remove product, date picker, draft view
//! ├── customer.rs  ◄─── identity-card autocomplete
//! ├── invoice.rs   ◄─── create order, invoice history
//! ├── menu.rs      ◄─── new invoice, clear products, exit, dev tools
//! └── config.rs    ◄─── configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the draft
//! fn add_product(draft: &DraftState, form: ProductForm)
//!
//! // Needs database and draft
//! async fn lookup_customer(db: &DbState, draft: &DraftState, fragment: &str)
//!
//! // Needs everything, plus where to send the printable document
//! async fn create_order(db, draft, config, sink: &dyn InvoiceSink, request)
//! ```
//!
//! Failures come back as [`ApiError`](crate::error::ApiError) with a
//! message ready for the inline error area.

pub mod config;
pub mod customer;
pub mod invoice;
pub mod menu;
pub mod product;
