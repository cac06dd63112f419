//! # Domain Types
//!
//! The three value types of an invoice.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Customer     │   │    Product      │   │      Invoice        │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id_card (ci)   │   │  id (UUID)      │   │  id (UUID)          │   │
//! │  │  name           │   │  name           │   │  customer           │   │
//! │  │                 │   │  price (Money)  │   │  products (ordered) │   │
//! │  │                 │   │  qty            │   │  date (formatted)   │   │
//! │  │                 │   │                 │   │  total (cached)     │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three are immutable once built. Fields are private and every value
//! goes through a validating constructor, so holding a `Product` means
//! holding a valid one.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::date::{format_date, DEFAULT_DATE_FORMAT};
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{validate_id_card, validate_price, validate_product_name, validate_quantity};

// =============================================================================
// Customer
// =============================================================================

/// A customer identified by their identity card (cédula).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    name: String,
    id_card: String,
}

impl Customer {
    /// Creates a customer.
    ///
    /// Fails with `Required` / `TooShort` when the identity card is empty or
    /// shorter than three characters. The name is stored as typed.
    ///
    /// ## Example
    /// ```rust
    /// use factura_core::Customer;
    ///
    /// assert!(Customer::new("juan perez", "12").is_err());
    /// let customer = Customer::new("juan perez", "1234").unwrap();
    /// assert_eq!(customer.client_name(), "Juan perez");
    /// ```
    pub fn new(name: impl Into<String>, id_card: &str) -> ValidationResult<Self> {
        let id_card = validate_id_card(id_card)?;

        Ok(Customer {
            name: name.into(),
            id_card: id_card.to_string(),
        })
    }

    /// Display name: the stored name with its first character upper-cased.
    pub fn client_name(&self) -> String {
        capitalize_first_letter(&self.name)
    }

    /// The name exactly as it was entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity card (the customer's unique key).
    pub fn id_card(&self) -> &str {
        &self.id_card
    }
}

/// Upper-cases the first character only; the rest is left untouched.
fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Product
// =============================================================================

/// A line item of the invoice being drafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    qty: i64,
}

impl Product {
    /// Creates a product with a fresh UUID v4 id.
    ///
    /// All three fields are required: an empty name, a zero price or a zero
    /// quantity fail with `Required`. Negative price or quantity fail with
    /// `MustBePositive`. A line whose `price × qty` does not fit in the
    /// money range fails with `TooLarge`.
    pub fn new(name: impl AsRef<str>, price: Money, qty: i64) -> ValidationResult<Self> {
        let name = validate_product_name(name.as_ref())?;
        validate_price(price)?;
        validate_quantity(qty)?;
        price
            .checked_multiply_quantity(qty)
            .ok_or_else(|| ValidationError::too_large("total"))?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
            qty,
        })
    }

    /// Unique id within the session; the only key used for removal.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn qty(&self) -> i64 {
        self.qty
    }

    /// Contribution of this line to the invoice total (`price × qty`).
    #[inline]
    pub fn line_total(&self) -> Money {
        // `new` rejects lines whose product does not fit.
        Money::from_cents(self.price.cents().saturating_mul(self.qty))
    }
}

/// Sums the line totals of `products`.
///
/// The single total policy of the crate: quantity-aware, `Σ price × qty`.
/// Both the draft's running total and the invoice total use it. Fails with
/// `TooLarge` when the sum leaves the money range.
pub fn products_total<'a>(
    products: impl IntoIterator<Item = &'a Product>,
) -> ValidationResult<Money> {
    Money::checked_sum(products.into_iter().map(Product::line_total))
        .ok_or_else(|| ValidationError::too_large("total"))
}

// =============================================================================
// Invoice
// =============================================================================

/// A finalized invoice: the unit of rendering and of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    id: String,
    customer: Customer,
    products: Vec<Product>,
    date: String,
    total: Money,
}

impl Invoice {
    /// Builds an invoice dated `date`, or today when `date` is `None`.
    ///
    /// Fails with `Required { field: "products" }` when `products` is empty.
    pub fn new(
        customer: Customer,
        products: Vec<Product>,
        date: Option<NaiveDate>,
    ) -> ValidationResult<Self> {
        InvoiceBuilder::new()
            .customer(customer)
            .products(products)
            .date(date)
            .build()
    }

    /// Starts an [`InvoiceBuilder`].
    pub fn builder() -> InvoiceBuilder {
        InvoiceBuilder::new()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Capitalized customer name, as printed.
    pub fn customer_full_name(&self) -> String {
        self.customer.client_name()
    }

    pub fn customer_id_card(&self) -> &str {
        self.customer.id_card()
    }

    /// Line items in the order they were added to the draft.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Formatted date (`dd/mm/yy` unless built with another pattern).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Total computed once at construction.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Human-readable text form of the line items for storage.
    ///
    /// One line per product (`name | qty: N | unit: $X.XX`) in invoice
    /// order, then a `Total: $X.XX` line. Write-once; never parsed back.
    ///
    /// ## Example
    /// ```text
    /// Oil Filter | qty: 2 | unit: $12.50
    /// Brake Pad | qty: 1 | unit: $8.00
    /// Total: $33.00
    /// ```
    pub fn products_summary(&self) -> String {
        let mut lines: Vec<String> = self
            .products
            .iter()
            .map(|p| format!("{} | qty: {} | unit: {}", p.name(), p.qty(), p.price()))
            .collect();
        lines.push(format!("Total: {}", self.total));
        lines.join("\n")
    }
}

// =============================================================================
// Invoice Builder
// =============================================================================

/// Step-by-step construction of an [`Invoice`].
///
/// Used by the order flow, where the customer may not have been resolved
/// yet; `build` reports the missing piece as a `ValidationError`.
///
/// ## Example
/// ```rust
/// use factura_core::{Customer, Invoice, Money, Product};
/// use chrono::NaiveDate;
///
/// let invoice = Invoice::builder()
///     .customer(Customer::new("ana", "9876").unwrap())
///     .product(Product::new("Chain", Money::from_cents(2000), 1).unwrap())
///     .date(NaiveDate::from_ymd_opt(2026, 10, 16))
///     .build()
///     .unwrap();
/// assert_eq!(invoice.date(), "16/10/26");
///
/// assert!(Invoice::builder().build().is_err()); // no customer
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    customer: Option<Customer>,
    products: Vec<Product>,
    date: Option<NaiveDate>,
    today: Option<NaiveDate>,
    date_format: Option<String>,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Sets the customer from an optional value (e.g. an unresolved form).
    pub fn maybe_customer(mut self, customer: Option<Customer>) -> Self {
        self.customer = customer;
        self
    }

    /// Replaces the line items.
    pub fn products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Appends one line item.
    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Explicitly chosen invoice date; `None` means "today".
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Overrides the clock used when no date was chosen.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Overrides the `dd/mm/yy` pattern.
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = Some(pattern.into());
        self
    }

    /// Validates and builds the invoice, computing its total once.
    pub fn build(self) -> ValidationResult<Invoice> {
        let customer = self
            .customer
            .ok_or_else(|| ValidationError::required("customer"))?;

        if self.products.is_empty() {
            return Err(ValidationError::required("products"));
        }

        let date = self
            .date
            .or(self.today)
            .unwrap_or_else(|| Local::now().date_naive());
        let pattern = self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
        let total = products_total(&self.products)?;

        Ok(Invoice {
            id: Uuid::new_v4().to_string(),
            customer,
            products: self.products,
            date: format_date(date, pattern),
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
