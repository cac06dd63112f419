//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` struct from `factura-db` contains a `SqlitePool` which
//! is inherently thread-safe; commands share it without extra locking.

use factura_db::Database;

/// Session handle on the persistence gateway.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let hit = db_state.inner().customers().find_suggestion("123").await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
