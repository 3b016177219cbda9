use async_trait::async_trait;
use serde::Serialize;

use super::embed;
use crate::backend::BackendClient;
use crate::contracts::Entry;
use crate::errors::AppError;
use crate::navigator::routes::{RouteName, RouteParams};
use crate::navigator::View;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionPage<'a> {
    route: RouteName,
    edit_key: &'a str,
    entry: Entry,
    allowed_hosts: Vec<String>,
}

/// Edit page for one submission, reached through a personal edit link.
pub struct SubmissionView {
    template: String,
    backend: BackendClient,
}

impl SubmissionView {
    pub fn new(template: String, backend: BackendClient) -> Self {
        Self { template, backend }
    }
}

#[async_trait]
impl View for SubmissionView {
    async fn render(&self, params: &RouteParams) -> Result<String, AppError> {
        let edit_key = params
            .get("id")
            .ok_or_else(|| AppError::Validation("Missing edit link id".to_string()))?;

        let (entry, allowed_hosts) = tokio::try_join!(
            self.backend.fetch_editable_entry(edit_key),
            self.backend.fetch_allowed_hosts()
        )?;

        embed(
            &self.template,
            &SubmissionPage {
                route: RouteName::Edit,
                edit_key,
                entry,
                allowed_hosts,
            },
        )
    }
}
