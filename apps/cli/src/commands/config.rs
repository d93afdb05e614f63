//! # Config Command
//!
//! Prints the effective configuration (file + environment + defaults) as
//! TOML. The output is a valid config file to start from.

use tracing::debug;

use crate::error::CliResult;
use crate::state::ConfigState;

/// Renders the configuration in use.
pub fn show_config(config: &ConfigState) -> CliResult<String> {
    debug!("config command");
    Ok(config.to_toml()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_round_trips() {
        let mut config = ConfigState::default();
        config.store_name = "GO-RENT Bali".to_string();

        let out = show_config(&config).unwrap();
        assert!(out.contains("store_name = \"GO-RENT Bali\""));
        assert!(out.contains("[[discounts]]"));
        assert_eq!(ConfigState::from_toml(&out).unwrap(), config);
    }
}
