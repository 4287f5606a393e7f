//! Shared application state for the API server.

use std::time::Instant;

use logdock_core::SharedStore;

use crate::config::ApiConfig;

/// State shared across all request handlers.
pub struct AppState {
    config: ApiConfig,
    store: SharedStore,
    started_at: Instant,
}

impl AppState {
    /// Creates new state around a shared record store.
    #[must_use]
    pub fn new(config: ApiConfig, store: SharedStore) -> Self {
        Self {
            config,
            store,
            started_at: Instant::now(),
        }
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the shared record store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Seconds since the server state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logdock_core::shared_store;

    #[test]
    fn state_exposes_store_and_config() {
        let state = AppState::new(ApiConfig::default(), shared_store());

        assert!(state.store().is_empty());
        assert_eq!(state.config().bind_addr.port(), 3000);
        assert!(state.uptime_secs() < 5);
    }
}
