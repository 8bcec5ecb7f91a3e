//! Mock SIGOF portal for testing.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cycles::CatalogError;
use crate::orders::OrdersError;
use crate::portal::{AuthError, Credentials, Portal, Session, UnitId};

/// A recorded portal call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedPortalCall {
    Login { username: String },
    DownloadReport { cycle: String, date: NaiveDate },
    DownloadCatalog,
}

/// What the mock answers for a cycle's report.
#[derive(Debug, Clone)]
pub enum MockReport {
    /// Spreadsheet bytes served with the xlsx content type.
    Spreadsheet(Vec<u8>),
    /// Non-spreadsheet answer (expired session or unknown cycle).
    Unavailable,
    /// The request never completed.
    TransportError(String),
}

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    unit_id: UnitId,
}

/// Mock implementation of the Portal trait.
///
/// Provides controllable behavior for testing:
/// - Accounts accepted by `login`
/// - Report answers per cycle (unknown cycles are unavailable)
/// - Catalog bytes, or an unavailable catalog when unset
/// - Recorded calls for assertions
///
/// # Example
///
/// ```rust,ignore
/// use repartos_core::testing::{fixtures, MockPortal};
///
/// let portal = MockPortal::new();
/// portal.add_account("lecturista", "clave", UnitId(7)).await;
/// portal.set_report("101", fixtures::report_bytes(&[
///     fixtures::report_row("12345", "UNIT001", "7", "ver foto"),
/// ])).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPortal {
    accounts: Arc<RwLock<HashMap<String, MockAccount>>>,
    reports: Arc<RwLock<HashMap<String, MockReport>>>,
    catalog: Arc<RwLock<Option<Vec<u8>>>>,
    calls: Arc<RwLock<Vec<RecordedPortalCall>>>,
}

impl MockPortal {
    /// Create a mock portal with no accounts, reports or catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Accept `username`/`password` and report `unit_id` on login.
    pub async fn add_account(&self, username: &str, password: &str, unit_id: UnitId) {
        self.accounts.write().await.insert(
            username.to_string(),
            MockAccount {
                password: password.to_string(),
                unit_id,
            },
        );
    }

    /// Serve `bytes` as the spreadsheet report of `cycle`.
    pub async fn set_report(&self, cycle: &str, bytes: Vec<u8>) {
        self.set_report_answer(cycle, MockReport::Spreadsheet(bytes))
            .await;
    }

    pub async fn set_report_answer(&self, cycle: &str, answer: MockReport) {
        self.reports.write().await.insert(cycle.to_string(), answer);
    }

    /// Serve `bytes` as the catalog spreadsheet.
    pub async fn set_catalog(&self, bytes: Vec<u8>) {
        *self.catalog.write().await = Some(bytes);
    }

    pub async fn clear_catalog(&self) {
        *self.catalog.write().await = None;
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<RecordedPortalCall> {
        self.calls.read().await.clone()
    }

    /// Cycles whose report was requested, in order.
    pub async fn requested_cycles(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedPortalCall::DownloadReport { cycle, .. } => Some(cycle.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: RecordedPortalCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl Portal for MockPortal {
    fn name(&self) -> &str {
        "mock"
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.record(RecordedPortalCall::Login {
            username: credentials.username.clone(),
        })
        .await;

        let accounts = self.accounts.read().await;
        match accounts.get(&credentials.username) {
            Some(account) if account.password == credentials.password => Ok(Session::new(
                credentials.username.clone(),
                account.unit_id,
                Client::new(),
            )),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn download_report(
        &self,
        _session: &Session,
        cycle: &str,
        date: NaiveDate,
    ) -> Result<Vec<u8>, OrdersError> {
        self.record(RecordedPortalCall::DownloadReport {
            cycle: cycle.to_string(),
            date,
        })
        .await;

        match self.reports.read().await.get(cycle).cloned() {
            Some(MockReport::Spreadsheet(bytes)) => Ok(bytes),
            Some(MockReport::TransportError(message)) => Err(OrdersError::Transport(message)),
            Some(MockReport::Unavailable) | None => Err(OrdersError::ReportUnavailable {
                cycle: cycle.to_string(),
            }),
        }
    }

    async fn download_catalog(&self) -> Result<Vec<u8>, CatalogError> {
        self.record(RecordedPortalCall::DownloadCatalog).await;

        self.catalog
            .read()
            .await
            .clone()
            .ok_or_else(|| CatalogError::Unavailable("mock catalog unset".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_accepts_known_account() {
        let portal = MockPortal::new();
        portal.add_account("ana", "clave", UnitId(7)).await;

        let session = portal.login(&Credentials::new("ana", "clave")).await.unwrap();
        assert_eq!(session.unit_id(), UnitId(7));

        let result = portal.login(&Credentials::new("ana", "otra")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let result = portal.login(&Credentials::new("nadie", "clave")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        assert_eq!(portal.calls().await.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_cycle_is_unavailable() {
        let portal = MockPortal::new();
        let session = Session::new("ana", UnitId(7), Client::new());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let result = portal.download_report(&session, "999", date).await;
        assert!(matches!(result, Err(OrdersError::ReportUnavailable { .. })));
        assert_eq!(portal.requested_cycles().await, vec!["999"]);
    }

    #[tokio::test]
    async fn test_catalog_unset_is_unavailable() {
        let portal = MockPortal::new();
        assert!(portal.download_catalog().await.is_err());

        portal.set_catalog(vec![1, 2, 3]).await;
        assert_eq!(portal.download_catalog().await.unwrap(), vec![1, 2, 3]);
    }
}
