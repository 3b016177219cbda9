use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::navigator::ViewRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Route table and loaded views, shared by every navigation.
    pub views: Arc<ViewRegistry>,
    pub backend: BackendClient,
    pub config: Config,
}
