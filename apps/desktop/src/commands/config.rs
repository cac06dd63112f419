//! # Config Commands
//!
//! Read access to the application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (company block, currency, date format for the UI)
/// - `factura init` prints it
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();
        assert_eq!(json["company"]["name"], "Repuestos Moto Garcia");
        assert_eq!(json["currencySymbol"], "$");
        assert_eq!(json["environment"], "development");
    }
}
