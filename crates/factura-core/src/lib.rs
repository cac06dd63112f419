//! # factura-core: Pure Business Logic for Factura
//!
//! Domain types and rules for drafting an invoice. Everything here is a pure
//! function of its inputs: no database, no rendering, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Factura Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/desktop (session + commands)              │   │
//! │  │   add_product ──► lookup_customer ──► create_order ──► render   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ factura-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   draft   │  │   date    │  │   │
//! │  │   │ Customer  │  │   Money   │  │ DraftList │  │ dd/mm/yy  │  │   │
//! │  │   │ Product   │  │  parsing  │  │ Snapshot  │  │ formatter │  │   │
//! │  │   │ Invoice   │  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   └───────────┘                                                │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 factura-db (Persistence Gateway)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Product, Invoice
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`draft`] - The mutable product list of the invoice being built
//! - [`date`] - Token based date formatting (`dd/mm/yy`)
//! - [`error`] - Domain error types
//! - [`validation`] - Field level rules shared by the constructors
//!
//! ## Example Usage
//!
//! ```rust
//! use factura_core::{Customer, Invoice, Money, Product, ProductDraftList};
//!
//! let mut draft = ProductDraftList::new();
//! draft.add(Product::new("Oil Filter", Money::from_cents(1250), 2).unwrap()).unwrap();
//! draft.add(Product::new("Brake Pad", Money::from_cents(800), 1).unwrap()).unwrap();
//! assert_eq!(draft.total().cents(), 3300);
//!
//! let customer = Customer::new("juan perez", "1234").unwrap();
//! let invoice = Invoice::new(customer, draft.to_vec(), None).unwrap();
//! assert_eq!(invoice.total(), draft.total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod date;
pub mod draft;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use date::{format_date, parse_picker_date, DEFAULT_DATE_FORMAT};
pub use draft::{DraftSnapshot, ProductDraftList};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a customer identity card (cédula).
pub const MIN_ID_CARD_LEN: usize = 3;
