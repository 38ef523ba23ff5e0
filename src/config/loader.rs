//! Configuration loader for YAML files
//!
//! Loads and validates the exchange configuration document from YAML.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;

use super::types::AppConfig;

/// Load the exchange configuration document from a YAML file
///
/// The file must exist, parse as an [`AppConfig`] and pass
/// [`AppConfig::validate`]. Credentials may still be absent here; they can be
/// supplied from the environment before the adapter is built.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use exchange_adapters::config::load_config;
///
/// let config = load_config(Path::new("config/exchange.yaml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let reader = BufReader::new(File::open(path)?);
    let config: AppConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!("YAML parse error in '{}': {}", path.display(), e))
    })?;

    validated(config)
}

/// Same as [`load_config`] for YAML already in memory (tests, embedded defaults)
pub fn load_config_from_str(yaml_content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| AppError::Config(format!("YAML parse error: {}", e)))?;

    validated(config)
}

fn validated(config: AppConfig) -> Result<AppConfig, AppError> {
    config.validate()?;
    tracing::debug!(
        exchange = %config.exchange,
        market = %config.market,
        timeout_s = config.config.network.connection_timeout_seconds,
        "Configuration loaded"
    );
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG_YAML: &str = r#"
exchange: bittrex
market: BTC-LTC
config:
  authentication:
    key: my-key
    secret: my-secret
  network:
    connection_timeout_seconds: 20
    non_fatal_http_status_codes: [502, 503, 504]
    non_fatal_error_messages:
      - "Connection reset"
      - "Connection refused"
  other:
    buy-fee: "0.25"
    sell-fee: "0.25"
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        assert_eq!(config.exchange, "bittrex");
        assert_eq!(config.market, "BTC-LTC");
        assert_eq!(config.config.network.connection_timeout_seconds, 20);
        assert_eq!(config.config.network.non_fatal_http_status_codes, vec![502, 503, 504]);
        assert_eq!(config.config.network.non_fatal_error_messages.len(), 2);
        assert_eq!(config.config.other.get("buy-fee"), Some("0.25"));
        assert_eq!(config.config.authentication.get("key"), Some("my-key"));
    }

    #[test]
    fn test_network_section_optional() {
        let yaml = r#"
exchange: bittrex
market: BTC-LTC
config:
  other:
    buy-fee: "0.25"
    sell-fee: "0.25"
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.config.network.connection_timeout_seconds, 30);
        assert!(config.config.authentication.get("key").is_none());
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let invalid_yaml = "invalid: yaml: content: [";
        let result = load_config_from_str(invalid_yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_load_config_from_str_validation_failure() {
        let invalid_config = r#"
exchange: bittrex
market: "  "
"#;
        let result = load_config_from_str(invalid_config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Market cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let yaml = r#"
exchange: bittrex
market: BTC-LTC
config:
  network:
    connection_timeout_seconds: 0
"#;
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("connection_timeout_seconds"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_load_config_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_CONFIG_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.exchange, "bittrex");
        assert_eq!(config.config.other.get("sell-fee"), Some("0.25"));
    }

    #[test]
    fn test_load_config_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: [yaml: content").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }
}
