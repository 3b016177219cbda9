//! Navigator — resolves a path to a route and activates its view.
//!
//! Views are loaded on first activation and cached in a [`ViewRegistry`]
//! shared by every navigator in the process. Each [`Navigator`] hands out a
//! ticket per navigation: when a load finishes after a newer navigation has
//! started, the stale result is dropped and reported as
//! [`NavigationOutcome::Superseded`].

pub mod routes;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{AppError, ModuleLoadError};
use self::routes::{RouteMatch, RouteName, RouteParams, RouteTable};

/// A loaded view, ready to render pages for its route.
#[async_trait]
pub trait View: Send + Sync {
    async fn render(&self, params: &RouteParams) -> Result<String, AppError>;
}

/// Deferred view implementation. `load` runs at most once per route unless it fails.
#[async_trait]
pub trait LoadableView: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn View>, ModuleLoadError>;
}

/// Route table plus the lazily populated view cache.
pub struct ViewRegistry {
    routes: RouteTable,
    loaders: HashMap<RouteName, Arc<dyn LoadableView>>,
    loaded: HashMap<RouteName, OnceCell<Arc<dyn View>>>,
}

impl ViewRegistry {
    pub fn new(
        routes: RouteTable,
        loaders: impl IntoIterator<Item = (RouteName, Arc<dyn LoadableView>)>,
    ) -> Self {
        let loaders: HashMap<_, _> = loaders.into_iter().collect();
        let loaded = routes
            .routes()
            .iter()
            .map(|def| (def.name, OnceCell::new()))
            .collect();
        Self {
            routes,
            loaders,
            loaded,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn is_loaded(&self, route: RouteName) -> bool {
        self.loaded
            .get(&route)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Returns the cached view for `route`, loading it on first use.
    /// A failed load leaves the cache empty so the next activation tries again.
    pub async fn activate(&self, route: RouteName) -> Result<Arc<dyn View>, ModuleLoadError> {
        let cell = self
            .loaded
            .get(&route)
            .ok_or(ModuleLoadError::Unregistered(route))?;
        let loader = self
            .loaders
            .get(&route)
            .ok_or(ModuleLoadError::Unregistered(route))?;

        let view = cell
            .get_or_try_init(|| async {
                info!("Loading view for route '{route}'");
                loader.load().await.map_err(|e| {
                    warn!("View for route '{route}' failed to load: {e}");
                    e
                })
            })
            .await?;

        Ok(Arc::clone(view))
    }
}

/// A resolved route whose view is loaded.
pub struct ActiveView {
    pub route: RouteMatch,
    pub view: Arc<dyn View>,
}

impl ActiveView {
    pub async fn render(&self) -> Result<String, AppError> {
        self.view.render(&self.route.params).await
    }
}

pub enum NavigationOutcome {
    Ready(ActiveView),
    /// A newer navigation started while this one was loading its view.
    Superseded,
}

/// One navigation session. Last navigation wins.
pub struct Navigator {
    registry: Arc<ViewRegistry>,
    latest: AtomicU64,
}

impl Navigator {
    pub fn new(registry: Arc<ViewRegistry>) -> Self {
        Self {
            registry,
            latest: AtomicU64::new(0),
        }
    }

    pub async fn navigate(
        &self,
        path: &str,
        query: BTreeMap<String, String>,
    ) -> Result<NavigationOutcome, AppError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let mut route = self.registry.routes().resolve(path)?;
        route.params.query = query;
        debug!("Navigation #{ticket}: '{path}' -> route '{}'", route.name);

        let view = self.registry.activate(route.name).await?;

        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!("Navigation #{ticket} to '{path}' superseded; discarding");
            return Ok(NavigationOutcome::Superseded);
        }

        Ok(NavigationOutcome::Ready(ActiveView { route, view }))
    }
}
