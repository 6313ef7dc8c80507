use crate::config::types::{Config, ExporterConfig, RouterConfig};
use crate::router::base_url;
use crate::{ConfigError, ConfigResult};
use std::net::SocketAddr;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_router_config(&config.router)?;
    validate_exporter_config(&config.exporter)?;
    Ok(())
}

/// Validates router identity and transport settings
fn validate_router_config(config: &RouterConfig) -> ConfigResult<()> {
    if config.address.trim().is_empty() {
        return Err(ConfigError::Validation(
            "router address cannot be empty".to_string(),
        ));
    }

    base_url(&config.address).map_err(|e| ConfigError::InvalidAddress(e.to_string()))?;

    if config.username.is_empty() {
        return Err(ConfigError::Validation(
            "router username cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms < MIN_TIMEOUT_MS || config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be between {} and {}, got {}",
            MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates the metrics endpoint and scheduling settings
fn validate_exporter_config(config: &ExporterConfig) -> ConfigResult<()> {
    config.listen_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid listen-address '{}': {}",
            config.listen_address, e
        ))
    })?;

    if config.interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "interval-secs must be >= 1, got {}",
            config.interval_secs
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_router_address() {
        let mut config = Config::default();

        config.router.address = "192.168.1.1:8080".to_string();
        assert!(validate(&config).is_ok());

        config.router.address = "http://router.lan".to_string();
        assert!(validate(&config).is_ok());

        config.router.address = "  ".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.router.address = "ftp://router.lan".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidAddress(_))
        ));

        config.router.address = "http://router.lan/admin".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = Config::default();

        config.router.timeout_ms = 99;
        assert!(validate(&config).is_err());

        config.router.timeout_ms = 60_001;
        assert!(validate(&config).is_err());

        config.router.timeout_ms = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_exporter_config() {
        let mut config = Config::default();

        config.exporter.listen_address = "not-an-address".to_string();
        assert!(validate(&config).is_err());

        config.exporter.listen_address = "[::]:9300".to_string();
        assert!(validate(&config).is_ok());

        config.exporter.interval_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut config = Config::default();
        config.router.username.clear();
        assert!(validate(&config).is_err());
    }
}
