//! # Database Migrations
//!
//! Embedded SQL migrations for the customers and invoices tables.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Database::new / ensure_schema                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (created on first run)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  001_initial_schema.sql  customers + invoices, IF NOT EXISTS           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Record checksum in _sqlx_migrations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New schema changes go in a new `NNN_description.sql` file; applied
//! migrations are never edited.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Migrations embedded from `migrations/sqlite` at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration, in filename order.
///
/// Idempotent: running it against an up-to-date database does nothing.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(
        embedded = MIGRATOR.migrations.len(),
        "Checking for pending migrations"
    );

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts, for diagnostics.
///
/// A database that was never migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_status_before_and_after_migrating() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(applied, 0);

        run_migrations(db.pool()).await.unwrap();
        run_migrations(db.pool()).await.unwrap();

        let (_, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(applied, 1);
    }
}
