use std::sync::Arc;

use commander_db::repositories::CommandStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Command persistence; each request opens its own unit of work.
    pub store: Arc<dyn CommandStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
