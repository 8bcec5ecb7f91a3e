pub mod config;
pub mod cycles;
pub mod metrics;
pub mod orders;
pub mod portal;
pub mod service;
pub mod testing;
pub mod workbook;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use cycles::{load_cycles, CatalogError, Cycle};
pub use orders::{
    export_batch, export_report, fetch_batch, fetch_photo_report, BatchReport, CycleFailure,
    ExportFile, OrdersError, PhotoFilter, PhotoOrder, PhotoReport, PhotoUrlTemplate,
};
pub use portal::{AuthError, Credentials, Portal, Session, SigofPortal, UnitId};
pub use service::{RepartoService, ServiceSettings};
pub use workbook::{Table, WorkbookError};
