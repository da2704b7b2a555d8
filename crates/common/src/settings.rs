use std::str;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{ENV_PREFIX, ENV_SEPARATOR};
use crate::error::BidderError;
use crate::integrations::flipp::FlippConfig;

/// Settings for the outbound HTTP transport.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct TransportSettings {
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1, max = 60000))]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    1000
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub flipp: FlippConfig,
    #[serde(default)]
    #[validate(nested)]
    pub transport: TransportSettings,
}

impl Settings {
    /// Load the workspace default configuration embedded at compile time.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the embedded TOML is invalid.
    pub fn new() -> Result<Self, Report<BidderError>> {
        let toml_bytes = include_bytes!("../../../flipp-bidder.toml");
        let toml_str = str::from_utf8(toml_bytes).change_context(BidderError::Configuration {
            message: "Embedded settings are not valid UTF-8".to_string(),
        })?;

        Self::from_toml(toml_str)
    }

    /// Parse settings from TOML, apply `FLIPP_BIDDER__` environment overrides
    /// and validate the result.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if parsing, merging or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<BidderError>> {
        let environment = Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(BidderError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(BidderError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(BidderError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Render the effective settings (after environment overrides) as TOML.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization fails.
    pub fn to_canonical_toml(&self) -> Result<String, Report<BidderError>> {
        toml::to_string(self).change_context(BidderError::Configuration {
            message: "Failed to serialize settings".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT_ENV: &str = "FLIPP_BIDDER__TRANSPORT__TIMEOUT_MS";

    #[test]
    fn test_settings_new() {
        temp_env::with_var_unset(TIMEOUT_ENV, || {
            let settings = Settings::new().expect("embedded settings should load");
            assert!(settings.flipp.enabled);
            assert!(settings.flipp.endpoint.starts_with("https://"));
            assert_eq!(settings.transport.timeout_ms, 1000);
        });
    }

    #[test]
    fn test_settings_from_valid_toml() {
        let toml_str = r#"
            [flipp]
            endpoint = "https://flipp.example.com/prebid_campaigns"

            [transport]
            timeout_ms = 250
            "#;

        temp_env::with_var_unset(TIMEOUT_ENV, || {
            let settings = Settings::from_toml(toml_str).expect("should parse");
            assert_eq!(
                settings.flipp.endpoint,
                "https://flipp.example.com/prebid_campaigns"
            );
            assert!(settings.flipp.enabled, "enabled defaults to true");
            assert_eq!(settings.transport.timeout_ms, 250);
        });
    }

    #[test]
    fn test_settings_missing_flipp_section() {
        let toml_str = r#"
            [transport]
            timeout_ms = 250
            "#;

        let err = Settings::from_toml(toml_str).expect_err("should fail");
        assert!(matches!(
            err.current_context(),
            BidderError::Configuration { .. }
        ));
    }

    #[test]
    fn test_settings_rejects_invalid_endpoint() {
        let toml_str = r#"
            [flipp]
            endpoint = "not a url"
            "#;

        assert!(Settings::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_settings_rejects_zero_timeout() {
        let toml_str = r#"
            [flipp]
            endpoint = "https://flipp.example.com/prebid_campaigns"

            [transport]
            timeout_ms = 0
            "#;

        temp_env::with_var_unset(TIMEOUT_ENV, || {
            assert!(Settings::from_toml(toml_str).is_err());
        });
    }

    #[test]
    fn test_override_env() {
        let toml_str = r#"
            [flipp]
            endpoint = "https://flipp.example.com/prebid_campaigns"
            "#;

        temp_env::with_var(TIMEOUT_ENV, Some("4200"), || {
            let settings = Settings::from_toml(toml_str).expect("should parse");
            assert_eq!(settings.transport.timeout_ms, 4200);
        });
    }

    #[test]
    fn test_canonical_toml_round_trips() {
        let settings = Settings::new().expect("embedded settings should load");
        let rendered = settings.to_canonical_toml().expect("should render");
        let reparsed = Settings::from_toml(&rendered).expect("should reparse");
        assert_eq!(reparsed.flipp.endpoint, settings.flipp.endpoint);
    }
}
