// Views: each route's page. Loading a view reads its HTML template from the
// assets directory; rendering fetches the view's payload and embeds it.

pub mod admin;
pub mod submission;
pub mod voting;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::backend::BackendClient;
use crate::errors::{AppError, ModuleLoadError};
use crate::navigator::routes::{RouteName, RouteTable};
use crate::navigator::{LoadableView, View, ViewRegistry};

/// Marker in a view template replaced by the page's initial data.
pub const DATA_SLOT: &str = "<!--wvote:data-->";

pub fn asset_name(route: RouteName) -> &'static str {
    match route {
        RouteName::Vote => "VotingView.html",
        RouteName::Edit => "SubmissionView.html",
        RouteName::Admin => "AdminView.html",
    }
}

/// Loads a view's template from disk on first activation.
pub struct AssetLoader {
    route: RouteName,
    path: PathBuf,
    backend: BackendClient,
}

impl AssetLoader {
    pub fn new(route: RouteName, assets_dir: &Path, backend: BackendClient) -> Self {
        Self {
            route,
            path: assets_dir.join(asset_name(route)),
            backend,
        }
    }
}

#[async_trait]
impl LoadableView for AssetLoader {
    async fn load(&self) -> Result<Arc<dyn View>, ModuleLoadError> {
        let template = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ModuleLoadError::Asset {
                path: self.path.clone(),
                source,
            })?;

        if !template.contains(DATA_SLOT) {
            return Err(ModuleLoadError::MissingSlot {
                path: self.path.clone(),
            });
        }

        info!("Loaded {} ({} bytes)", self.path.display(), template.len());

        let backend = self.backend.clone();
        let view: Arc<dyn View> = match self.route {
            RouteName::Vote => Arc::new(voting::VotingView::new(template, backend)),
            RouteName::Edit => Arc::new(submission::SubmissionView::new(template, backend)),
            RouteName::Admin => Arc::new(admin::AdminView::new(template, backend)),
        };
        Ok(view)
    }
}

/// Registry with an [`AssetLoader`] for every route in the table.
pub fn build_registry(routes: RouteTable, assets_dir: &Path, backend: BackendClient) -> ViewRegistry {
    let loaders: Vec<(RouteName, Arc<dyn LoadableView>)> = routes
        .routes()
        .iter()
        .map(|def| {
            let loader: Arc<dyn LoadableView> =
                Arc::new(AssetLoader::new(def.name, assets_dir, backend.clone()));
            (def.name, loader)
        })
        .collect();
    ViewRegistry::new(routes, loaders)
}

/// Fills the template's data slot with `data` as an inline JSON script.
pub fn embed<T: Serialize>(template: &str, data: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(data).map_err(|e| AppError::Internal(e.into()))?;
    // `<` only occurs inside JSON strings, where the \u003c escape decodes back to it.
    let json = json.replace('<', "\\u003c");
    let script = format!(r#"<script id="wvote-data" type="application/json">{json}</script>"#);
    Ok(template.replacen(DATA_SLOT, &script, 1))
}
