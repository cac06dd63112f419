//! # Invoice Rendering
//!
//! Pure functions from finished values to printable HTML, and the sinks
//! that receive the documents.
//!
//! ## Output Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Invoice + ConfigState ──► render_invoice() ──► HTML String             │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                    InvoiceSink::emit(invoice, html)     │
//! │                                       │                     │           │
//! │                                       ▼                     ▼           │
//! │                              HtmlFileSink            RecordingSink      │
//! │                              invoice-<id>.html       (in memory)        │
//! │                                                                         │
//! │  DraftSnapshot + ConfigState ──► render_product_table() ──► view table  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The printed document calls `window.print()` on load and closes itself.
//! All interpolated text is HTML-escaped. Amounts use the configured
//! currency symbol and code.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

use crate::state::ConfigState;
use factura_core::{DraftSnapshot, Invoice};

// =============================================================================
// Errors
// =============================================================================

/// Failure to hand a rendered document to its destination.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Rendering
// =============================================================================

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the printable invoice document.
///
/// Layout: company block and date, customer block, line table
/// (`UND | PRODUCTO | PRECIO`, unit prices, invoice order), then
/// the total (`Total USD` by default) and an empty `Total BS` cell.
pub fn render_invoice(invoice: &Invoice, config: &ConfigState) -> String {
    let company = &config.company;
    let mut rows = String::new();
    for product in invoice.products() {
        let _ = write!(
            rows,
            "\n          <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            product.qty(),
            escape_html(product.name()),
            escape_html(&config.format_currency(product.price())),
        );
    }

    let logo = company
        .logo_path
        .as_deref()
        .map(|path| {
            format!(
                r#"<img src="{}" alt="{} Logo" width="100" height="100">"#,
                escape_html(path),
                escape_html(&company.name),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Factura</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style type="text/css">
      body {{ padding: 20px; font-family: sans-serif; }}
      table {{ width: 100%; border-collapse: collapse; }}
      th, td {{ text-align: left; padding: 4px 8px; border-bottom: 1px solid #ddd; }}
      .header {{ display: flex; justify-content: space-between; }}
    </style>
  </head>
  <body onload="window.print();window.close()">
    <div class="header">
      <div>{logo}</div>
      <div>
        <h2>Datos de empresa</h2>
        <h3>{company_name}</h3>
        <p><strong>RIF:</strong> {rif}</p>
        <p><strong>Ubicación:</strong> {address}</p>
      </div>
      <div>
        <h5>Factura</h5>
        <p>Fecha: <span id="invoiceDate">{date}</span></p>
      </div>
    </div>
    <hr>
    <div>
      <h5>Información de cliente</h5>
      <p><strong>Cliente:</strong> <span id="customerName">{customer_name}</span></p>
      <p><strong>Cédula:</strong> <span id="customerId">{customer_id}</span></p>
    </div>
    <table>
      <thead>
        <tr><th>UND</th><th>PRODUCTO</th><th>PRECIO</th></tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>
    <table>
      <tbody>
        <tr><td><strong>{total_label}: {total}</strong></td><td><span id="totalUSD"></span></td></tr>
        <tr><td><strong>Total BS:</strong></td><td><span id="totalBS"></span></td></tr>
      </tbody>
    </table>
  </body>
</html>
"#,
        logo = logo,
        company_name = escape_html(&company.name),
        rif = escape_html(&company.rif),
        address = escape_html(&company.address),
        date = escape_html(invoice.date()),
        customer_name = escape_html(&invoice.customer_full_name()),
        customer_id = escape_html(invoice.customer_id_card()),
        rows = rows,
        total_label = escape_html(&config.total_label()),
        total = escape_html(&config.format_currency(invoice.total())),
    )
}

/// Builds the product table of the drafting view from a snapshot.
///
/// Each row carries a delete button whose `data-id` is the product id.
pub fn render_product_table(snapshot: &DraftSnapshot, config: &ConfigState) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div>\n  <h2 id=\"totalAmount\">{}: {}</h2>\n</div>\n",
        escape_html(&config.total_label()),
        escape_html(&config.format_currency(snapshot.total))
    );
    html.push_str("<table>\n  <thead>\n    <tr><th>UND</th><th>PRODUCTO</th><th>PRECIO</th><th></th></tr>\n  </thead>\n  <tbody>");
    for product in &snapshot.items {
        let _ = write!(
            html,
            "\n    <tr><td>{}</td><td>{}</td><td>{}</td><td><button class=\"deleteProduct\" data-id=\"{}\">Eliminar</button></td></tr>",
            product.qty(),
            escape_html(product.name()),
            escape_html(&config.format_currency(product.price())),
            escape_html(product.id()),
        );
    }
    html.push_str("\n  </tbody>\n</table>\n");
    html
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for rendered invoices.
pub trait InvoiceSink: Send + Sync {
    /// Delivers `html` for `invoice`; returns where it ended up.
    fn emit(&self, invoice: &Invoice, html: &str) -> Result<String, SinkError>;
}

/// Writes each invoice to `invoice-<id>.html` in a directory.
///
/// Opening the file in a browser prints it.
#[derive(Debug, Clone)]
pub struct HtmlFileSink {
    dir: PathBuf,
}

impl HtmlFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        HtmlFileSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the invoice with `id` is written to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("invoice-{}.html", id))
    }
}

impl InvoiceSink for HtmlFileSink {
    fn emit(&self, invoice: &Invoice, html: &str) -> Result<String, SinkError> {
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(invoice.id());
        fs::write(&path, html).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        info!(invoice_id = %invoice.id(), path = %path.display(), "Invoice written");
        Ok(path.display().to_string())
    }
}

/// A document captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    pub invoice_id: String,
    pub html: String,
}

/// Keeps rendered invoices in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    documents: Mutex<Vec<RenderedInvoice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, oldest first.
    pub fn documents(&self) -> Vec<RenderedInvoice> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl InvoiceSink for RecordingSink {
    fn emit(&self, invoice: &Invoice, html: &str) -> Result<String, SinkError> {
        debug!(invoice_id = %invoice.id(), "Invoice recorded");
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RenderedInvoice {
                invoice_id: invoice.id().to_string(),
                html: html.to_string(),
            });
        Ok(format!("memory://invoice-{}", invoice.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use factura_core::{Customer, Money, Product, ProductDraftList};

    fn product(name: &str, cents: i64, qty: i64) -> Product {
        Product::new(name, Money::from_cents(cents), qty).unwrap()
    }

    fn invoice(products: Vec<Product>) -> Invoice {
        Invoice::new(
            Customer::new("juan perez", "1234").unwrap(),
            products,
            NaiveDate::from_ymd_opt(2026, 10, 16),
        )
        .unwrap()
    }

    #[test]
    fn test_invoice_document_contents() {
        let html = render_invoice(
            &invoice(vec![product("Oil Filter", 1250, 2), product("Brake Pad", 800, 1)]),
            &ConfigState::default(),
        );

        assert!(html.contains(r#"onload="window.print();window.close()""#));
        assert!(html.contains("Repuestos Moto Garcia"));
        assert!(html.contains("DTM3CG J-41287312-1"));
        assert!(html.contains("16/10/26"));
        assert!(html.contains("Juan perez"));
        assert!(html.contains("<th>UND</th><th>PRODUCTO</th><th>PRECIO</th>"));
        assert!(html.contains("<tr><td>2</td><td>Oil Filter</td><td>$12.50</td></tr>"));
        assert!(html.contains("Total USD: $33.00"));
        assert!(html.contains(r#"<span id="totalBS"></span>"#));
    }

    #[test]
    fn test_amounts_use_configured_currency() {
        let config = ConfigState {
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            ..ConfigState::default()
        };
        let products = vec![product("Oil Filter", 1250, 2), product("Brake Pad", 800, 1)];

        let html = render_invoice(&invoice(products.clone()), &config);
        assert!(html.contains("<tr><td>2</td><td>Oil Filter</td><td>€12.50</td></tr>"));
        assert!(html.contains("Total EUR: €33.00"));
        assert!(!html.contains("$"));

        let mut draft = ProductDraftList::new();
        for p in products {
            draft.add(p).unwrap();
        }
        let table = render_product_table(&draft.snapshot(), &config);
        assert!(table.contains("Total EUR: €33.00"));
    }

    #[test]
    fn test_rows_follow_draft_order_after_deletions() {
        let mut draft = ProductDraftList::new();
        let a = product("Alpha", 100, 1);
        let a_id = a.id().to_string();
        draft.add(a).unwrap();
        draft.add(product("Bravo", 100, 1)).unwrap();
        draft.add(product("Charlie", 100, 1)).unwrap();
        draft.remove_by_id(&a_id);
        draft.add(product("Delta", 100, 1)).unwrap();

        let html = render_invoice(&invoice(draft.to_vec()), &ConfigState::default());

        let positions: Vec<usize> = ["Bravo", "Charlie", "Delta"]
            .iter()
            .map(|name| html.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!html.contains("Alpha"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_invoice(
            &invoice(vec![product("<script>alert(1)</script>", 100, 1)]),
            &ConfigState::default(),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_product_table_from_snapshot() {
        let mut draft = ProductDraftList::new();
        let chain = product("Chain", 2000, 2);
        let chain_id = chain.id().to_string();
        draft.add(chain).unwrap();

        let html = render_product_table(&draft.snapshot(), &ConfigState::default());
        assert!(html.contains("Total USD: $40.00"));
        assert!(html.contains(&format!("data-id=\"{}\"", chain_id)));

        let empty = render_product_table(&DraftSnapshot::default(), &ConfigState::default());
        assert!(empty.contains("Total USD: $0.00"));
        assert!(!empty.contains("<td>"));
    }

    #[test]
    fn test_file_sink_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let sink = HtmlFileSink::new(dir.path().join("out"));
        let invoice = invoice(vec![product("Chain", 2000, 1)]);

        let location = sink.emit(&invoice, "<html></html>").unwrap();

        let path = sink.path_for(invoice.id());
        assert_eq!(location, path.display().to_string());
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_file_sink_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let sink = HtmlFileSink::new(&blocker);
        let err = sink
            .emit(&invoice(vec![product("Chain", 2000, 1)]), "x")
            .unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
    }

    #[test]
    fn test_recording_sink_keeps_documents() {
        let sink = RecordingSink::new();
        let invoice = invoice(vec![product("Chain", 2000, 1)]);

        let location = sink.emit(&invoice, "doc").unwrap();

        assert!(location.ends_with(invoice.id()));
        assert_eq!(sink.documents()[0].html, "doc");
    }
}
