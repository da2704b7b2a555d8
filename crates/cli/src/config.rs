//! Configuration loading and the `config validate` command.
//!
//! Configuration is loaded from a TOML file and merged with environment
//! variables prefixed with `FLIPP_BIDDER__`. For example,
//! `FLIPP_BIDDER__TRANSPORT__TIMEOUT_MS` overrides `transport.timeout_ms`.

use std::fs;
use std::path::{Path, PathBuf};

use flipp_bidder_common::settings::Settings;

use crate::error::CliError;

/// Load settings from `file`, or the embedded defaults when no file is given.
pub(crate) fn load_settings(file: Option<&Path>) -> Result<Settings, CliError> {
    match file {
        Some(path) => load_and_merge_config(path).map(|(settings, _)| settings),
        None => Ok(Settings::new()?),
    }
}

/// Load and merge configuration from a TOML file with environment variables.
pub(crate) fn load_and_merge_config(file: &Path) -> Result<(Settings, String), CliError> {
    let content = fs::read_to_string(file)?;

    log::debug!("Loading config from: {}", file.display());

    let settings = Settings::from_toml(&content)
        .map_err(|e| CliError::Config(format!("Failed to parse and merge config: {:?}", e)))?;

    let merged_toml = settings
        .to_canonical_toml()
        .map_err(|e| CliError::Config(format!("Failed to serialize merged config: {e:?}")))?;

    Ok((settings, merged_toml))
}

/// Validate a configuration file and print a short summary.
pub fn validate(file: PathBuf, verbose: bool) -> Result<(), CliError> {
    let (settings, merged_toml) = load_and_merge_config(&file)?;

    println!("Configuration is valid");
    println!("  File: {}", file.display());
    println!(
        "  Flipp: {} ({})",
        if settings.flipp.enabled {
            "enabled"
        } else {
            "disabled"
        },
        settings.flipp.endpoint
    );
    println!("  Timeout: {}ms", settings.transport.timeout_ms);

    if verbose {
        let value: toml::Value = toml::from_str(&merged_toml)
            .map_err(|e| CliError::Config(format!("Failed to re-read merged config: {e}")))?;
        if let Some(table) = value.as_table() {
            println!("\nSections found:");
            for key in table.keys() {
                println!("  - [{}]", key);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("flipp-bidder.toml");
        let mut file = fs::File::create(&config_path).unwrap();
        write!(file, "{}", content).unwrap();
        config_path
    }

    const VALID_CONFIG: &str = r#"
[flipp]
enabled = true
endpoint = "https://flipp.example.com/prebid_campaigns"

[transport]
timeout_ms = 750
"#;

    #[test]
    fn test_validate_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, VALID_CONFIG);

        assert!(validate(config_path, true).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
[flipp]
endpoint = "not a url"
"#,
        );

        let result = validate(config_path, false);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
[flipp]
endpoint = "https://flipp.example.com/prebid_campaigns"

[transport]
timeout_ms = 0
"#,
        );

        assert!(validate(config_path, false).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let result = validate(PathBuf::from("/nonexistent/flipp-bidder.toml"), false);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_settings_uses_file_when_given() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, VALID_CONFIG);

        let settings = load_settings(Some(&config_path)).unwrap();
        assert_eq!(
            settings.flipp.endpoint,
            "https://flipp.example.com/prebid_campaigns"
        );
    }

    #[test]
    fn test_load_settings_falls_back_to_embedded_defaults() {
        let settings = load_settings(None).unwrap();
        assert!(settings.flipp.enabled);
        assert!(settings.flipp.endpoint.starts_with("https://"));
    }
}
