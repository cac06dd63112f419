//! # Command Line Front End
//!
//! Drives the same commands the drafting screen uses.
//!
//! ```text
//! factura init
//! factura order --name "juan perez" --ci 1234 \
//!               --product "Oil Filter:12.50:2" --product "Brake Pad:8:1" \
//!               [--date 2026-10-16] [--save]
//! factura lookup 123
//! factura history 1234
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::commands::customer::{lookup_customer, CustomerForm};
use crate::commands::invoice::{create_order, list_invoices, OrderRequest};
use crate::commands::product::{add_product, set_date, ProductForm};
use crate::commands::{config::get_config, menu::menu_items};
use crate::database_path;
use crate::render::{render_product_table, HtmlFileSink};
use crate::state::{ConfigState, DraftState};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "factura", about = "Invoice drafting and printing", long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides FACTURA_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rendered invoices (overrides FACTURA_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and show the configuration
    Init,
    /// Build an invoice, write it as HTML and optionally store it
    Order(OrderArgs),
    /// Suggest a stored customer from part of an identity card
    Lookup {
        fragment: String,
    },
    /// List stored invoices of a customer
    History {
        ci: String,
    },
}

#[derive(Debug, Args)]
struct OrderArgs {
    /// Customer name
    #[arg(long, default_value = "")]
    name: String,

    /// Customer identity card (cédula)
    #[arg(long)]
    ci: String,

    /// Line item as NAME:PRICE:QTY; repeat for more lines
    #[arg(long = "product", value_parser = parse_product)]
    products: Vec<ProductForm>,

    /// Invoice date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Store the customer and the invoice
    #[arg(long)]
    save: bool,
}

fn parse_product(value: &str) -> Result<ProductForm, String> {
    ProductForm::from_triple(value).map_err(|e| e.message)
}

impl Cli {
    /// Applies the flags on top of `config`.
    pub fn apply_overrides(&self, mut config: ConfigState) -> ConfigState {
        if let Some(db) = &self.db {
            config.database_path = Some(db.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config
    }

    pub async fn run(self, config: ConfigState) -> CliResult {
        let config = self.apply_overrides(config);

        match self.command {
            Commands::Init => init(&config).await,
            Commands::Order(args) => order(&config, args).await,
            Commands::Lookup { fragment } => lookup(&config, &fragment).await,
            Commands::History { ci } => history(&config, &ci).await,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn init(config: &ConfigState) -> CliResult {
    let db = crate::open_database(config).await?;
    println!("database: {}", database_path(config)?.display());
    print_json(&get_config(config))?;
    print_json(&menu_items(config))?;
    db.inner().close().await;
    Ok(())
}

async fn order(config: &ConfigState, args: OrderArgs) -> CliResult {
    let draft = DraftState::new();
    for form in args.products {
        add_product(&draft, form)?;
    }
    if let Some(date) = &args.date {
        set_date(&draft, date)?;
    }

    eprintln!("{}", render_product_table(&draft.snapshot(), config));

    let db = crate::open_database(config).await?;
    let sink = HtmlFileSink::new(&config.output_dir);
    let request = OrderRequest {
        customer: CustomerForm::new(args.name, args.ci),
        save: args.save,
    };

    let result = create_order(&db, &draft, config, &sink, request).await;
    db.inner().close().await;

    let response = result?;
    info!(invoice_id = %response.invoice_id, "Order complete");
    print_json(&response)
}

async fn lookup(config: &ConfigState, fragment: &str) -> CliResult {
    let db = crate::open_database(config).await?;
    let draft = DraftState::new();

    let result = lookup_customer(&db, &draft, fragment).await;
    db.inner().close().await;

    match result? {
        Some(suggestion) => print_json(&suggestion),
        None => {
            println!("Sin coincidencias");
            Ok(())
        }
    }
}

async fn history(config: &ConfigState, ci: &str) -> CliResult {
    let db = crate::open_database(config).await?;
    let result = list_invoices(&db, ci).await;
    db.inner().close().await;

    print_json(&result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_db::{Database, DbConfig};

    fn temp_config(dir: &std::path::Path) -> ConfigState {
        ConfigState {
            database_path: Some(dir.join("factura.db")),
            output_dir: dir.join("out"),
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_parse_order_command() {
        let cli = Cli::try_parse_from([
            "factura",
            "order",
            "--name",
            "juan perez",
            "--ci",
            "1234",
            "--product",
            "Oil Filter:12.50:2",
            "--product",
            "Brake Pad:8:1",
            "--save",
        ])
        .unwrap();

        match cli.command {
            Commands::Order(args) => {
                assert_eq!(args.products.len(), 2);
                assert_eq!(args.products[0], ProductForm::new("Oil Filter", "12.50", "2"));
                assert!(args.save);
                assert!(args.date.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_product_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["factura", "order", "--ci", "1234", "--product", "Chain"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["factura", "--db", "/tmp/x.db", "lookup", "12"]).unwrap();
        let config = cli.apply_overrides(ConfigState::default());
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/x.db")));
    }

    #[tokio::test]
    async fn test_order_writes_document_and_stores_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());

        let cli = Cli::try_parse_from([
            "factura",
            "order",
            "--name",
            "juan perez",
            "--ci",
            "1234",
            "--product",
            "Chain:20:1",
            "--date",
            "2026-10-16",
            "--save",
        ])
        .unwrap();
        cli.run(config.clone()).await.unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .collect();
        assert_eq!(written.len(), 1);

        let db = Database::new(DbConfig::new(dir.path().join("factura.db")))
            .await
            .unwrap();
        let stored = db.invoices().list_by_customer("1234").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, "16/10/26");
        db.close().await;
    }

    #[tokio::test]
    async fn test_order_without_products_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["factura", "order", "--ci", "1234"]).unwrap();

        assert!(cli.run(temp_config(dir.path())).await.is_err());
        assert!(!dir.path().join("out").exists());
    }
}
