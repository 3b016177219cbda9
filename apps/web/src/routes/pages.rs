use std::collections::BTreeMap;

use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
};

use crate::errors::AppError;
use crate::navigator::{NavigationOutcome, Navigator};
use crate::state::AppState;

/// GET on any path not claimed by another route: navigate and render the view.
pub async fn handle_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let navigator = Navigator::new(state.views.clone());

    match navigator.navigate(uri.path(), query).await? {
        NavigationOutcome::Ready(active) => Ok(Html(active.render().await?)),
        // A request-scoped navigator only ever sees one navigation.
        NavigationOutcome::Superseded => Err(AppError::Internal(anyhow!(
            "navigation to '{}' was superseded",
            uri.path()
        ))),
    }
}
