//! # State Module
//!
//! Session state for the desktop app, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌────────────────────┐  ┌──────────────────┐        │
//! │  │   DbState    │  │    DraftState      │  │   ConfigState    │        │
//! │  │              │  │                    │  │                  │        │
//! │  │  Database    │  │  Arc<Mutex<        │  │  company         │        │
//! │  │  (SQLite     │  │    InvoiceDraft    │  │  output_dir      │        │
//! │  │   pool)      │  │  >> + watch chan   │  │  environment     │        │
//! │  └──────────────┘  └────────────────────┘  └──────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • DraftState: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the states they need.

mod config;
mod db;
mod draft;

pub use config::{project_dirs, AppEnvironment, CompanyProfile, ConfigState};
pub use db::DbState;
pub use draft::{CustomerSuggestion, DraftState, InvoiceDraft};
