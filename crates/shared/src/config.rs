//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Report computation configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Report computation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Domestic currency of the chart of accounts.
    #[serde(default = "default_domestic_currency")]
    pub domestic_currency: Currency,
    /// Absolute tolerance (whole units) for detail-vs-summary checks.
    #[serde(default = "default_rounding_tolerance")]
    pub rounding_tolerance: u32,
}

fn default_domestic_currency() -> Currency {
    Currency::Mxn
}

fn default_rounding_tolerance() -> u32 {
    1
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            domestic_currency: default_domestic_currency(),
            rounding_tolerance: default_rounding_tolerance(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BALANZA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporting_defaults() {
        let cfg = ReportingConfig::default();
        assert_eq!(cfg.domestic_currency, Currency::Mxn);
        assert_eq!(cfg.rounding_tolerance, 1);
    }
}
