use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog section exists (enforced by serde)
/// - Server port is not 0
/// - Session idle timeout is not 0
/// - Portal and catalog URLs are http(s)
/// - Order column layout is consistent with the minimum report width
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }
    if config.server.session_idle_minutes == 0 {
        return Err(ConfigError::ValidationError(
            "server.session_idle_minutes cannot be 0".to_string(),
        ));
    }

    require_http_url("portal.base_url", &config.portal.base_url)?;
    require_http_url("catalog.url", &config.catalog.url)?;

    if !(-14..=14).contains(&config.portal.utc_offset_hours) {
        return Err(ConfigError::ValidationError(format!(
            "portal.utc_offset_hours must be between -14 and 14, got {}",
            config.portal.utc_offset_hours
        )));
    }

    let orders = &config.orders;
    if orders.min_columns <= orders.flag_column {
        return Err(ConfigError::ValidationError(format!(
            "orders.min_columns ({}) must exceed orders.flag_column ({})",
            orders.min_columns, orders.flag_column
        )));
    }
    if let Some(column) = orders
        .identifier_columns
        .iter()
        .find(|&&column| column >= orders.min_columns)
    {
        return Err(ConfigError::ValidationError(format!(
            "orders.identifier_columns entry {} is outside orders.min_columns ({})",
            column, orders.min_columns
        )));
    }
    if orders.flag_value.is_empty() {
        return Err(ConfigError::ValidationError(
            "orders.flag_value cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn require_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got '{}'",
            key, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, OrdersConfig, PortalConfig, ServerConfig};
    use std::net::IpAddr;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            portal: PortalConfig::default(),
            catalog: CatalogConfig::new("https://docs.example.com/export"),
            orders: OrdersConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server = ServerConfig {
            host: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 0,
            ..ServerConfig::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_session_idle_fails() {
        let mut config = valid_config();
        config.server.session_idle_minutes = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("session_idle_minutes"));
    }

    #[test]
    fn test_validate_catalog_url_must_be_http() {
        let mut config = valid_config();
        config.catalog.url = "ftp://docs.example.com/export".to_string();
        assert!(validate_config(&config).is_err());

        config.catalog.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_flag_column_outside_min_columns_fails() {
        let mut config = valid_config();
        config.orders.flag_column = 26;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("orders.min_columns"));
    }

    #[test]
    fn test_validate_identifier_column_outside_min_columns_fails() {
        let mut config = valid_config();
        config.orders.identifier_columns = [0, 1, 30];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("identifier_columns"));
    }

    #[test]
    fn test_validate_utc_offset_range() {
        let mut config = valid_config();
        config.portal.utc_offset_hours = 15;
        assert!(validate_config(&config).is_err());

        config.portal.utc_offset_hours = -14;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_flag_value_fails() {
        let mut config = valid_config();
        config.orders.flag_value = String::new();
        assert!(validate_config(&config).is_err());
    }
}
