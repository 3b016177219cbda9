pub mod health;
pub mod pages;
pub mod votes;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);
    let base = mount_prefix(&state.config.base_path);

    Router::new()
        .route(&format!("{base}/health"), get(health::health_handler))
        .route(&format!("{base}/api/submit_vote"), post(votes::handle_submit_vote))
        .nest_service(&format!("{base}/assets"), assets)
        // Everything else is a client route: `/`, `/edit/:id`, `/admin`.
        .fallback(get(pages::handle_page))
        .with_state(state)
}

/// `BASE_PATH` as a route prefix: leading slash, no trailing slash, empty at the root.
fn mount_prefix(base_path: &str) -> String {
    base_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| format!("/{s}"))
        .collect()
}
