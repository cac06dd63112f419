//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. CLI flags (`--db`, `--output-dir`)
//! 2. Environment variables (`FACTURA_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use factura_core::{Money, DEFAULT_DATE_FORMAT};

/// Company block printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    /// Tax registration number (RIF)
    pub rif: String,
    pub address: String,
    /// Image shown next to the company block, relative to the document
    pub logo_path: Option<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Repuestos Moto Garcia".to_string(),
            rif: "DTM3CG J-41287312-1".to_string(),
            address: "Av Sucre a 100mts del Palacio de Miraflores".to_string(),
            logo_path: Some("./logo.jpg".to_string()),
        }
    }
}

/// Build environment; gates the developer tools menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl AppEnvironment {
    /// Anything other than `production` (case-insensitive) is development.
    pub fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            AppEnvironment::Production
        } else {
            AppEnvironment::Development
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Company block on printed invoices
    pub company: CompanyProfile,

    /// Currency code (ISO 4217), printed in the total label
    pub currency_code: String,

    /// Currency symbol in front of every amount
    pub currency_symbol: String,

    /// Invoice date pattern (`dd`, `mm`, `yy`, `yyyy` tokens)
    pub date_format: String,

    /// Where rendered invoices are written
    pub output_dir: PathBuf,

    /// Explicit database file; `None` means the platform data directory
    pub database_path: Option<PathBuf>,

    pub environment: AppEnvironment,
}

impl Default for ConfigState {
    /// Defaults for development.
    ///
    /// ## Default Values
    /// - Company: Repuestos Moto Garcia
    /// - Currency: USD ($)
    /// - Date: dd/mm/yy
    /// - Output: `<data dir>/invoices`, or `./invoices` when no home is known
    /// - Environment: development
    fn default() -> Self {
        ConfigState {
            company: CompanyProfile::default(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            output_dir: default_output_dir(),
            database_path: None,
            environment: AppEnvironment::Development,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FACTURA_DB_PATH`: Database file
    /// - `FACTURA_OUTPUT_DIR`: Directory for rendered invoices
    /// - `FACTURA_COMPANY_NAME`: Company name on the invoice header
    /// - `FACTURA_CURRENCY_CODE` / `FACTURA_CURRENCY_SYMBOL`: Amount labels
    /// - `FACTURA_ENV`: `production` hides the developer tools
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("FACTURA_DB_PATH").filter(|v| !v.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("FACTURA_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("FACTURA_COMPANY_NAME").filter(|v| !v.trim().is_empty()) {
            config.company.name = name;
        }

        if let Some(code) = lookup("FACTURA_CURRENCY_CODE").filter(|v| !v.trim().is_empty()) {
            config.currency_code = code.trim().to_string();
        }

        if let Some(symbol) = lookup("FACTURA_CURRENCY_SYMBOL").filter(|v| !v.trim().is_empty()) {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(env) = lookup("FACTURA_ENV") {
            config.environment = AppEnvironment::from_value(&env);
        }

        config
    }

    /// Developer tools are only offered outside production.
    pub fn dev_tools_enabled(&self) -> bool {
        self.environment != AppEnvironment::Production
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }

    /// Label of the invoice total, e.g. `Total USD`.
    pub fn total_label(&self) -> String {
        format!("Total {}", self.currency_code)
    }
}

/// Platform data directory for the application, if the OS reports one.
///
/// - **Linux**: `~/.local/share/factura`
/// - **macOS**: `~/Library/Application Support/com.factura.factura`
/// - **Windows**: `%APPDATA%\factura\factura\data`
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "factura", "factura")
}

fn default_output_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("invoices"))
        .unwrap_or_else(|| PathBuf::from("invoices"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.total_label(), "Total USD");
    }

    #[test]
    fn test_currency_from_env() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("FACTURA_CURRENCY_CODE", "EUR"),
            ("FACTURA_CURRENCY_SYMBOL", " € "),
        ]));

        assert_eq!(config.format_currency(Money::from_cents(3300)), "€33.00");
        assert_eq!(config.total_label(), "Total EUR");
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[]));
        assert_eq!(config.company.name, "Repuestos Moto Garcia");
        assert_eq!(config.company.rif, "DTM3CG J-41287312-1");
        assert_eq!(config.date_format, "dd/mm/yy");
        assert!(config.database_path.is_none());
        assert!(config.dev_tools_enabled());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("FACTURA_DB_PATH", "/tmp/factura.db"),
            ("FACTURA_OUTPUT_DIR", "/tmp/out"),
            ("FACTURA_COMPANY_NAME", "Taller Perez"),
            ("FACTURA_ENV", "Production"),
        ]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/factura.db")));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.company.name, "Taller Perez");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.dev_tools_enabled());
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("FACTURA_DB_PATH", "  "),
            ("FACTURA_COMPANY_NAME", ""),
        ]));

        assert!(config.database_path.is_none());
        assert_eq!(config.company.name, "Repuestos Moto Garcia");
    }
}
