//! # Factura Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Parse the command line
//! 4. Run the command (database is opened per command)

use clap::Parser;
use tracing::error;

use factura_desktop_lib::cli::Cli;
use factura_desktop_lib::state::ConfigState;

#[tokio::main]
async fn main() {
    factura_desktop_lib::init_tracing();

    let config = ConfigState::from_env();
    let cli = Cli::parse();

    if let Err(e) = cli.run(config).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
