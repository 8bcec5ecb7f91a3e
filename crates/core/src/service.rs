//! Pipeline entry points for the presentation layer.
//!
//! [`RepartoService`] wires a [`Portal`] to the catalog, report and export
//! steps. It holds no per-user state: the caller keeps the [`Session`]
//! returned by [`RepartoService::login`] and passes it back on every call.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{CatalogConfig, Config, OrdersConfig};
use crate::cycles::{load_cycles, CatalogError, Cycle};
use crate::orders::{
    export_batch, export_report, fetch_batch, fetch_photo_report, today_at_offset, BatchReport,
    ExportFile, OrdersError, PhotoReport,
};
use crate::portal::{AuthError, Credentials, Portal, Session};
use crate::workbook::WorkbookError;

/// Settings the pipeline needs beyond the portal itself.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub catalog: CatalogConfig,
    pub orders: OrdersConfig,
    pub utc_offset_hours: i32,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.catalog.clone(),
            orders: config.orders.clone(),
            utc_offset_hours: config.portal.utc_offset_hours,
        }
    }
}

/// Login, catalog, report and export operations over one portal.
#[derive(Clone)]
pub struct RepartoService {
    portal: Arc<dyn Portal>,
    settings: ServiceSettings,
}

impl RepartoService {
    pub fn new(portal: Arc<dyn Portal>, settings: ServiceSettings) -> Self {
        Self { portal, settings }
    }

    pub fn portal(&self) -> &dyn Portal {
        self.portal.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Report date used for requests made now.
    pub fn today(&self) -> NaiveDate {
        today_at_offset(self.settings.utc_offset_hours)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.portal.login(credentials).await
    }

    /// Cycles owned by the session's unit.
    pub async fn cycles(&self, session: &Session) -> Result<Vec<Cycle>, CatalogError> {
        load_cycles(
            self.portal.as_ref(),
            &self.settings.catalog,
            session.unit_id(),
        )
        .await
    }

    /// Today's photo orders for one cycle.
    pub async fn photo_report(
        &self,
        session: &Session,
        cycle: &str,
    ) -> Result<PhotoReport, OrdersError> {
        self.photo_report_on(session, cycle, self.today()).await
    }

    pub async fn photo_report_on(
        &self,
        session: &Session,
        cycle: &str,
        date: NaiveDate,
    ) -> Result<PhotoReport, OrdersError> {
        fetch_photo_report(
            self.portal.as_ref(),
            session,
            cycle,
            date,
            &self.settings.orders,
        )
        .await
    }

    /// Today's photo orders for several cycles, fetched in order.
    pub async fn batch(&self, session: &Session, cycles: &[String]) -> BatchReport {
        self.batch_on(session, cycles, self.today()).await
    }

    pub async fn batch_on(
        &self,
        session: &Session,
        cycles: &[String],
        date: NaiveDate,
    ) -> BatchReport {
        fetch_batch(
            self.portal.as_ref(),
            session,
            cycles,
            date,
            &self.settings.orders,
        )
        .await
    }

    pub fn export_report(&self, report: &PhotoReport) -> Result<ExportFile, WorkbookError> {
        export_report(report)
    }

    pub fn export_batch(&self, batch: &BatchReport) -> Result<ExportFile, WorkbookError> {
        export_batch(batch)
    }
}
