//! HTTP implementation of the SIGOF portal.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::PortalConfig;
use crate::cycles::CatalogError;
use crate::metrics::{PORTAL_REQUESTS, PORTAL_REQUEST_DURATION};
use crate::orders::OrdersError;
use crate::workbook::is_xlsx_content_type;

use super::page::{extract_assigned_integer, extract_input_value, is_login_redirect};
use super::{AuthError, Credentials, Portal, Session, UnitId};

/// The portal rejects clients without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Why a login attempt failed. Only logged; callers get `InvalidCredentials`.
#[derive(Debug, Error)]
enum LoginFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("post-login page has no '{0}' assignment")]
    MissingUnitId(String),

    #[error("dashboard redirected back to the login page")]
    RedirectedToLogin,
}

/// SIGOF portal client.
///
/// Each login builds a fresh HTTP client with its own cookie store, so
/// sessions of different users never share cookies.
pub struct SigofPortal {
    config: PortalConfig,
    catalog_url: String,
    catalog_client: Client,
}

impl SigofPortal {
    /// Create a new portal client.
    pub fn new(config: PortalConfig, catalog_url: impl Into<String>) -> Result<Self, AuthError> {
        let catalog_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AuthError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            config,
            catalog_url: catalog_url.into(),
            catalog_client,
        })
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn login_url(&self) -> String {
        format!("{}{}", self.base_url(), self.config.login_path)
    }

    fn dashboard_url(&self) -> String {
        format!("{}{}", self.base_url(), self.config.dashboard_path)
    }

    /// Build the dated report URL for a cycle.
    ///
    /// Layout: `{report_path}/{scope}/0/{cycle}/0/0/{date}/{date}/0/`.
    fn report_url(&self, cycle: &str, date: NaiveDate) -> String {
        let day = date.format("%Y-%m-%d");
        format!(
            "{}{}/{}/0/{}/0/0/{}/{}/0/",
            self.base_url(),
            self.config.report_path.trim_end_matches('/'),
            self.config.report_scope,
            urlencoding::encode(cycle.trim()),
            day,
            day
        )
    }

    /// HTTP client for a new session, with its own cookie store.
    fn session_client(&self) -> Result<Client, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if let Ok(referer) = HeaderValue::from_str(&self.login_url()) {
            headers.insert(REFERER, referer);
        }

        Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs as u64))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()
    }

    async fn handshake(&self, credentials: &Credentials) -> Result<Session, LoginFailure> {
        let http = self.session_client()?;
        let login_url = self.login_url();

        debug!("Fetching login form from {}", login_url);
        let form_page = http.get(&login_url).send().await?.text().await?;

        let token = extract_input_value(&form_page, &self.config.csrf_field);
        if token.is_none() {
            debug!(
                "Login form has no '{}' input, posting without it",
                self.config.csrf_field
            );
        }

        let mut form = vec![
            (self.config.username_field.as_str(), credentials.username.as_str()),
            (self.config.password_field.as_str(), credentials.password.as_str()),
        ];
        if let Some(token) = token.as_deref() {
            form.push((self.config.csrf_field.as_str(), token));
        }

        let landing = http.post(&login_url).form(&form).send().await?.text().await?;
        let unit_id = extract_assigned_integer(&landing, &self.config.unit_variable)
            .map(UnitId)
            .ok_or_else(|| LoginFailure::MissingUnitId(self.config.unit_variable.clone()))?;

        let dashboard_url = self.dashboard_url();
        debug!("Confirming session against {}", dashboard_url);
        let dashboard = http.get(&dashboard_url).send().await?.text().await?;
        if is_login_redirect(&dashboard, &self.config.login_marker) {
            return Err(LoginFailure::RedirectedToLogin);
        }

        Ok(Session::new(credentials.username.clone(), unit_id, http))
    }
}

fn record(operation: &str, result: &str, start: Instant) {
    PORTAL_REQUESTS
        .with_label_values(&[operation, result])
        .inc();
    PORTAL_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());
}

#[async_trait]
impl Portal for SigofPortal {
    fn name(&self) -> &str {
        "sigof"
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let start = Instant::now();

        match self.handshake(credentials).await {
            Ok(session) => {
                record("login", "success", start);
                info!(
                    "Logged in to SIGOF as {} (unit {})",
                    session.username(),
                    session.unit_id()
                );
                Ok(session)
            }
            Err(failure) => {
                record("login", "rejected", start);
                warn!("SIGOF login for {} failed: {}", credentials.username, failure);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn download_report(
        &self,
        session: &Session,
        cycle: &str,
        date: NaiveDate,
    ) -> Result<Vec<u8>, OrdersError> {
        let start = Instant::now();
        let url = self.report_url(cycle, date);
        debug!("Requesting order report: {}", url);

        let response = session.http().get(&url).send().await.map_err(|e| {
            record("report", "transport_error", start);
            OrdersError::Transport(e.to_string())
        })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_xlsx_content_type(&content_type) {
            record("report", "unavailable", start);
            warn!(
                "Report for cycle {} returned '{}' instead of a spreadsheet (HTTP {})",
                cycle,
                content_type,
                response.status()
            );
            return Err(OrdersError::ReportUnavailable {
                cycle: cycle.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            record("report", "transport_error", start);
            OrdersError::Transport(e.to_string())
        })?;

        record("report", "success", start);
        debug!("Downloaded report for cycle {} ({} bytes)", cycle, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn download_catalog(&self) -> Result<Vec<u8>, CatalogError> {
        let start = Instant::now();
        debug!("Downloading cycle catalog");

        let result = async {
            let response = self
                .catalog_client
                .get(&self.catalog_url)
                .send()
                .await?
                .error_for_status()?;
            response.bytes().await
        }
        .await;

        match result {
            Ok(bytes) => {
                record("catalog", "success", start);
                Ok(bytes.to_vec())
            }
            Err(e) => {
                record("catalog", "unavailable", start);
                warn!("Cycle catalog download failed: {}", e);
                Err(CatalogError::Unavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal(base_url: &str) -> SigofPortal {
        let config = PortalConfig {
            base_url: base_url.to_string(),
            ..PortalConfig::default()
        };
        SigofPortal::new(config, "http://catalog.test/export.xlsx").unwrap()
    }

    #[test]
    fn test_report_url_layout() {
        let portal = portal("http://sigof.distriluz.com.pe/");
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(
            portal.report_url("12345", date),
            "http://sigof.distriluz.com.pe/plus/ComrepOrdenrepartos/ajax_reporte_excel_ordenes_historico/U/0/12345/0/0/2024-03-07/2024-03-07/0/"
        );
    }

    #[test]
    fn test_report_url_encodes_cycle() {
        let portal = portal("http://portal.test");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let url = portal.report_url(" 12/3 ", date);
        assert!(url.contains("/U/0/12%2F3/0/0/2024-01-02/2024-01-02/0/"));
    }

    #[test]
    fn test_login_and_dashboard_urls() {
        let portal = portal("http://portal.test/");
        assert_eq!(portal.login_url(), "http://portal.test/plus/usuario/login");
        assert_eq!(
            portal.dashboard_url(),
            "http://portal.test/plus/usuario/inicio"
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(portal("http://portal.test").name(), "sigof");
    }
}
