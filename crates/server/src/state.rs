use std::sync::Arc;

use repartos_core::{Config, Portal, RepartoService, SanitizedConfig, ServiceSettings};

use crate::sessions::SessionStore;

/// Shared application state
pub struct AppState {
    config: Config,
    service: RepartoService,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, portal: Arc<dyn Portal>) -> Self {
        let service = RepartoService::new(portal, ServiceSettings::from(&config));
        Self {
            config,
            service,
            sessions: SessionStore::new(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &RepartoService {
        &self.service
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
