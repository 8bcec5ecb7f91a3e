use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sessions unused for this long are dropped (default: 60)
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_minutes: default_session_idle_minutes(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    8080
}

fn default_session_idle_minutes() -> u64 {
    60
}

/// SIGOF portal endpoints and login form layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
    /// Portal root (e.g., "http://sigof.distriluz.com.pe")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Login form page; the credentials are posted back to the same URL
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Page fetched after login to confirm the session was accepted
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    /// Order report endpoint, without the positional arguments
    #[serde(default = "default_report_path")]
    pub report_path: String,
    /// Scope token placed right after the report path
    #[serde(default = "default_report_scope")]
    pub report_scope: String,
    #[serde(default = "default_username_field")]
    pub username_field: String,
    #[serde(default = "default_password_field")]
    pub password_field: String,
    /// Name of the hidden anti-forgery input on the login form
    #[serde(default = "default_csrf_field")]
    pub csrf_field: String,
    /// JavaScript variable holding the unit identifier after login
    #[serde(default = "default_unit_variable")]
    pub unit_variable: String,
    /// Substring that marks a redirect back to the login page
    #[serde(default = "default_login_marker")]
    pub login_marker: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Offset used to compute "today" for report requests (America/Lima = -5)
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            dashboard_path: default_dashboard_path(),
            report_path: default_report_path(),
            report_scope: default_report_scope(),
            username_field: default_username_field(),
            password_field: default_password_field(),
            csrf_field: default_csrf_field(),
            unit_variable: default_unit_variable(),
            login_marker: default_login_marker(),
            timeout_secs: default_timeout(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

fn default_base_url() -> String {
    "http://sigof.distriluz.com.pe".to_string()
}

fn default_login_path() -> String {
    "/plus/usuario/login".to_string()
}

fn default_dashboard_path() -> String {
    "/plus/usuario/inicio".to_string()
}

fn default_report_path() -> String {
    "/plus/ComrepOrdenrepartos/ajax_reporte_excel_ordenes_historico".to_string()
}

fn default_report_scope() -> String {
    "U".to_string()
}

fn default_username_field() -> String {
    "username".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}

fn default_csrf_field() -> String {
    "_csrfToken".to_string()
}

fn default_unit_variable() -> String {
    "defecto_iduunn".to_string()
}

fn default_login_marker() -> String {
    "usuario/login".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_utc_offset_hours() -> i32 {
    -5
}

/// Cycle catalog spreadsheet location and layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Export URL returning the catalog as xlsx
    pub url: String,
    /// Header of the column holding the owning unit
    #[serde(default = "default_unit_column")]
    pub unit_column: String,
    /// Header of the column holding the cycle code
    #[serde(default = "default_code_column")]
    pub code_column: String,
    /// Header of the column holding the cycle display name
    #[serde(default = "default_name_column")]
    pub name_column: String,
}

impl CatalogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            unit_column: default_unit_column(),
            code_column: default_code_column(),
            name_column: default_name_column(),
        }
    }
}

fn default_unit_column() -> String {
    "iduunn".to_string()
}

fn default_code_column() -> String {
    "ciclo".to_string()
}

fn default_name_column() -> String {
    "nombre".to_string()
}

/// Positional layout of the order report and the photo URL template.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrdersConfig {
    /// Columns holding identifier fields A, B and C
    #[serde(default = "default_identifier_columns")]
    pub identifier_columns: [usize; 3],
    /// Column whose value gates row inclusion (column Z)
    #[serde(default = "default_flag_column")]
    pub flag_column: usize,
    /// Reports narrower than this are rejected before filtering
    #[serde(default = "default_min_columns")]
    pub min_columns: usize,
    /// Exact, case-sensitive value of the flag cell for rows with a photo
    #[serde(default = "default_flag_value")]
    pub flag_value: String,
    #[serde(default = "default_photo_base_url")]
    pub photo_base_url: String,
    #[serde(default = "default_photo_extension")]
    pub photo_extension: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            identifier_columns: default_identifier_columns(),
            flag_column: default_flag_column(),
            min_columns: default_min_columns(),
            flag_value: default_flag_value(),
            photo_base_url: default_photo_base_url(),
            photo_extension: default_photo_extension(),
        }
    }
}

fn default_identifier_columns() -> [usize; 3] {
    [0, 1, 2]
}

fn default_flag_column() -> usize {
    25
}

fn default_min_columns() -> usize {
    26
}

fn default_flag_value() -> String {
    "ver foto".to_string()
}

fn default_photo_base_url() -> String {
    "https://d3jgwc2y5nosue.cloudfront.net/repartos/".to_string()
}

fn default_photo_extension() -> String {
    ".png".to_string()
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub portal: SanitizedPortalConfig,
    pub catalog: SanitizedCatalogConfig,
    pub orders: OrdersConfig,
}

/// Portal config without the login form internals
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPortalConfig {
    pub base_url: String,
    pub timeout_secs: u32,
    pub utc_offset_hours: i32,
}

/// Catalog config with the export URL hidden (it usually embeds a document key)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub url_configured: bool,
    pub unit_column: String,
    pub code_column: String,
    pub name_column: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            portal: SanitizedPortalConfig {
                base_url: config.portal.base_url.clone(),
                timeout_secs: config.portal.timeout_secs,
                utc_offset_hours: config.portal.utc_offset_hours,
            },
            catalog: SanitizedCatalogConfig {
                url_configured: !config.catalog.url.is_empty(),
                unit_column: config.catalog.unit_column.clone(),
                code_column: config.catalog.code_column.clone(),
                name_column: config.catalog.name_column.clone(),
            },
            orders: config.orders.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[catalog]
url = "https://docs.example.com/export"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.server.session_idle_minutes, 60);
        assert_eq!(config.portal.base_url, "http://sigof.distriluz.com.pe");
        assert_eq!(config.portal.utc_offset_hours, -5);
        assert_eq!(config.catalog.unit_column, "iduunn");
    }

    #[test]
    fn test_deserialize_orders_defaults() {
        let toml = r#"
[catalog]
url = "https://docs.example.com/export"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.orders.identifier_columns, [0, 1, 2]);
        assert_eq!(config.orders.flag_column, 25);
        assert_eq!(config.orders.min_columns, 26);
        assert_eq!(config.orders.flag_value, "ver foto");
        assert_eq!(
            config.orders.photo_base_url,
            "https://d3jgwc2y5nosue.cloudfront.net/repartos/"
        );
        assert_eq!(config.orders.photo_extension, ".png");
    }

    #[test]
    fn test_deserialize_custom_portal_fields() {
        let toml = r#"
[portal]
base_url = "http://localhost:9999"
username_field = "data[Usuario][login]"
csrf_field = "_token"
timeout_secs = 5

[catalog]
url = "https://docs.example.com/export"
code_column = "Codigo"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.portal.base_url, "http://localhost:9999");
        assert_eq!(config.portal.username_field, "data[Usuario][login]");
        assert_eq!(config.portal.password_field, "password");
        assert_eq!(config.portal.csrf_field, "_token");
        assert_eq!(config.portal.timeout_secs, 5);
        assert_eq!(config.catalog.code_column, "Codigo");
    }

    #[test]
    fn test_deserialize_missing_catalog_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_catalog_url() {
        let config = Config {
            server: ServerConfig::default(),
            portal: PortalConfig::default(),
            catalog: CatalogConfig::new("https://docs.example.com/d/secret-key/export"),
            orders: OrdersConfig::default(),
        };
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.catalog.url_configured);
        assert_eq!(sanitized.portal.timeout_secs, 30);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
