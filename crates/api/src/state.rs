use std::sync::Arc;

use entidto_db::ModelStore;

use crate::config::ServerConfig;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store backing the `people` routes.
    pub people: Arc<dyn ModelStore>,
    pub config: Arc<ServerConfig>,
}
