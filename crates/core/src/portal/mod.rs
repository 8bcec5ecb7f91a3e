//! SIGOF portal access.
//!
//! The [`Portal`] trait covers the three network calls of the pipeline: the
//! login handshake, the dated order report download and the cycle catalog
//! download. [`SigofPortal`] talks to the real portal over HTTP; tests use
//! `testing::MockPortal`.

mod page;
mod sigof;
mod types;

pub use page::{extract_assigned_integer, extract_input_value, is_login_redirect};
pub use sigof::SigofPortal;
pub use types::*;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cycles::CatalogError;
use crate::orders::OrdersError;

/// Network side of the pipeline.
#[async_trait]
pub trait Portal: Send + Sync {
    /// Name of this portal implementation
    fn name(&self) -> &str;

    /// Perform the login handshake and return an authenticated session.
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Download the order report of `cycle` for `date` as xlsx bytes.
    async fn download_report(
        &self,
        session: &Session,
        cycle: &str,
        date: NaiveDate,
    ) -> Result<Vec<u8>, OrdersError>;

    /// Download the cycle catalog spreadsheet as xlsx bytes.
    async fn download_catalog(&self) -> Result<Vec<u8>, CatalogError>;
}
