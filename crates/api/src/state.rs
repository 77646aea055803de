use std::sync::Arc;

use beacon_core::dispatcher::NotificationDispatcher;
use beacon_core::ports::{MessagingProvider, ProfileStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the caller extractor).
    pub config: Arc<ServerConfig>,
    /// Profile store, kept for the health probe.
    pub store: Arc<dyn ProfileStore>,
    /// The test-notification operation.
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn ProfileStore>,
        messenger: Arc<dyn MessagingProvider>,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(Arc::clone(&store), messenger);
        Self {
            config: Arc::new(config),
            store,
            dispatcher,
        }
    }
}
