//! # Seed Data Generator
//!
//! Populates the database with sample customers so the identity-card
//! autocomplete has something to suggest during development.
//!
//! ## Usage
//! ```bash
//! # Sample customers into ./factura_dev.db
//! cargo run -p factura-db --bin seed
//!
//! # Specify database path
//! cargo run -p factura-db --bin seed -- --db ./data/factura.db
//! ```
//!
//! Existing identity cards are skipped, so the seed can be re-run.

use std::path::PathBuf;

use clap::Parser;

use factura_core::Customer;
use factura_db::{Database, DbConfig, UpsertOutcome};

/// (full name, identity card)
const SAMPLE_CUSTOMERS: &[(&str, &str)] = &[
    ("juan perez", "12345678"),
    ("maria lopez", "4561239"),
    ("pedro rojas", "456789"),
    ("ana garcia", "20123456"),
    ("luis hernandez", "18765432"),
    ("carmen diaz", "9876543"),
    ("jose martinez", "15234987"),
    ("rosa gonzalez", "27111222"),
    ("carlos ramirez", "11223344"),
    ("elena torres", "30555666"),
];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Factura Seed Data Generator")]
struct SeedArgs {
    /// Database file path
    #[arg(short, long, default_value = "./factura_dev.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = SeedArgs::parse();
    let db_path = args.db;

    println!("Factura Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path.display());
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, schema ensured");

    let mut inserted = 0;
    let mut skipped = 0;

    for (name, ci) in SAMPLE_CUSTOMERS {
        let customer = Customer::new(*name, ci)?;
        match db.customers().upsert(&customer).await {
            Ok(UpsertOutcome::Inserted) => inserted += 1,
            Ok(UpsertOutcome::AlreadyExists) => skipped += 1,
            Err(e) => eprintln!("Failed to insert {}: {}", ci, e),
        }
    }

    println!("✓ Inserted {} customers ({} already present)", inserted, skipped);
    println!("  Total customers: {}", db.customers().count().await?);

    println!();
    println!("Verifying lookup...");
    match db.customers().find_suggestion("123").await? {
        Some(hit) => println!("  Lookup '123': {} ({})", hit.full_name, hit.ci),
        None => println!("  Lookup '123': no match"),
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
