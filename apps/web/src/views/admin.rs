use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::embed;
use crate::backend::BackendClient;
use crate::contracts::{AdminData, VotingData};
use crate::errors::AppError;
use crate::navigator::routes::{RouteName, RouteParams};
use crate::navigator::View;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminPage<'a> {
    route: RouteName,
    admin_key: &'a str,
    admin: AdminData,
    /// Next week's entries as they will appear on the voting page.
    preview: VotingData,
}

/// Admin dashboard. The access key arrives as `?key=` on the admin link.
pub struct AdminView {
    template: String,
    backend: BackendClient,
}

impl AdminView {
    pub fn new(template: String, backend: BackendClient) -> Self {
        Self { template, backend }
    }
}

#[async_trait]
impl View for AdminView {
    async fn render(&self, params: &RouteParams) -> Result<String, AppError> {
        let admin_key = params.query("key").ok_or(AppError::Unauthorized)?;

        let (admin, preview) = tokio::try_join!(
            self.backend.fetch_admin_data(admin_key),
            self.backend.fetch_preview_data(admin_key)
        )?;

        info!(
            "Admin page: {} votes, {} entries this week, {} next week",
            admin.votes.len(),
            admin.this_week().entries.len(),
            admin.next_week().entries.len()
        );

        embed(
            &self.template,
            &AdminPage {
                route: RouteName::Admin,
                admin_key,
                admin,
                preview,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{admin_payload, spawn_backend, voting_payload};
    use crate::views::testing::embedded_json;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use std::collections::BTreeMap;

    fn with_key(key: &str) -> RouteParams {
        RouteParams {
            path: BTreeMap::new(),
            query: BTreeMap::from([("key".to_string(), key.to_string())]),
        }
    }

    #[tokio::test]
    async fn test_renders_admin_and_preview() {
        let backend = spawn_backend(
            Router::new()
                .route(
                    "/api/admin/get_admin_data/:key",
                    get(|| async { Json(admin_payload()) }),
                )
                .route(
                    "/api/admin/get_preview_data/:key",
                    get(|| async { Json(voting_payload()) }),
                ),
        )
        .await;
        let view = AdminView::new("<!--wvote:data-->".to_string(), backend);

        let page = view.render(&with_key("a1b2c3d4")).await.unwrap();
        let data = embedded_json(&page);

        assert_eq!(data["route"], "admin");
        assert_eq!(data["adminKey"], "a1b2c3d4");
        assert_eq!(data["admin"]["votes"][0]["userID"], "336685325231325184");
        assert_eq!(data["admin"]["weeks"].as_array().unwrap().len(), 2);
        assert_eq!(data["admin"]["weeks"][0]["votingOpen"], true);
        assert_eq!(data["admin"]["weeks"][1]["submissionsOpen"], true);
        assert_eq!(data["preview"]["entries"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized() {
        let backend = spawn_backend(Router::new()).await;
        let view = AdminView::new("<!--wvote:data-->".to_string(), backend);

        let result = view.render(&RouteParams::default()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_expired_key_is_unauthorized() {
        let reject = || async { (StatusCode::UNAUTHORIZED, "Invalid or expired admin link") };
        let backend = spawn_backend(
            Router::new()
                .route("/api/admin/get_admin_data/:key", get(reject))
                .route("/api/admin/get_preview_data/:key", get(reject)),
        )
        .await;
        let view = AdminView::new("<!--wvote:data-->".to_string(), backend);

        let result = view.render(&with_key("expired")).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
