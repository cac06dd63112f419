//! # Factura Desktop Library
//!
//! Session state, commands and invoice rendering for the Factura
//! application. The `factura` binary is a thin command line front end
//! over this library.
//!
//! ## Module Organization
//! ```text
//! factura_desktop_lib/
//! ├── lib.rs          ◄─── You are here (logging, startup helpers)
//! ├── cli.rs          ◄─── Command line front end
//! ├── render.rs       ◄─── Invoice HTML + sinks
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── draft.rs    ◄─── Invoice draft + change channel
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Draft product commands
//! │   ├── customer.rs ◄─── Customer lookup commands
//! │   ├── invoice.rs  ◄─── Order creation
//! │   ├── menu.rs     ◄─── Menu actions
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing()            RUST_LOG or "info,factura=debug,..."      │
//! │  2. ConfigState::from_env()   + CLI overrides                           │
//! │  3. database_path(&config)    FACTURA_DB_PATH or platform data dir      │
//! │  4. open_database(&config)    pool, WAL, schema ensured                 │
//! │  5. DraftState::new()         empty draft                               │
//! │  6. commands::*               driven by the front end                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::path::PathBuf;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use factura_db::{Database, DbConfig};
use state::{project_dirs, ConfigState, DbState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=factura=trace` - Show trace for factura crates only
/// - Default: INFO, DEBUG for factura crates, WARN for sqlx
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,factura=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Resolution
/// 1. `config.database_path` (`FACTURA_DB_PATH` or `--db`)
/// 2. Platform data directory:
///    - **Linux**: `~/.local/share/factura/factura.db`
///    - **macOS**: `~/Library/Application Support/com.factura.factura/factura.db`
///    - **Windows**: `%APPDATA%\factura\factura\data\factura.db`
///
/// The parent directory is created if missing.
pub fn database_path(config: &ConfigState) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match &config.database_path {
        Some(path) => path.clone(),
        None => {
            let dirs = project_dirs().ok_or("Could not determine app data directory")?;
            dirs.data_dir().join("factura.db")
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(path)
}

/// Opens the database for `config` and wraps it for the commands.
pub async fn open_database(config: &ConfigState) -> Result<DbState, Box<dyn std::error::Error>> {
    let path = database_path(config)?;
    info!(path = %path.display(), "Database path determined");

    let db = Database::new(DbConfig::new(path)).await?;
    info!("Database connected and schema ensured");

    Ok(DbState::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            database_path: Some(dir.path().join("nested").join("factura.db")),
            ..ConfigState::default()
        };

        let path = database_path(&config).unwrap();

        assert_eq!(path, dir.path().join("nested").join("factura.db"));
        assert!(dir.path().join("nested").is_dir());
    }

    #[tokio::test]
    async fn test_open_database_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            database_path: Some(dir.path().join("factura.db")),
            ..ConfigState::default()
        };

        let db = open_database(&config).await.unwrap();

        assert!(db.inner().health_check().await);
        assert!(dir.path().join("factura.db").exists());
        db.inner().close().await;
    }
}
