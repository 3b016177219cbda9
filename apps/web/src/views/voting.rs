use std::borrow::Cow;
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::embed;
use crate::backend::BackendClient;
use crate::ballot::MAX_RATING;
use crate::contracts::VotingData;
use crate::errors::AppError;
use crate::navigator::routes::{RouteName, RouteParams};
use crate::navigator::View;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VotingPage<'a> {
    route: RouteName,
    data: &'a VotingData,
    /// Tip per parameter for ratings 1..=5, index 0 holding rating 1.
    help_tips: BTreeMap<&'a str, Vec<Cow<'a, str>>>,
}

fn resolve_help_tips(data: &VotingData) -> BTreeMap<&str, Vec<Cow<'_, str>>> {
    data.vote_params
        .iter()
        .map(|param| {
            let tips = (1..=MAX_RATING).map(|r| data.help_tip(param, r)).collect();
            (param.as_str(), tips)
        })
        .collect()
}

/// Public voting page for this week's entries.
pub struct VotingView {
    template: String,
    backend: BackendClient,
}

impl VotingView {
    pub fn new(template: String, backend: BackendClient) -> Self {
        Self { template, backend }
    }
}

#[async_trait]
impl View for VotingView {
    async fn render(&self, _params: &RouteParams) -> Result<String, AppError> {
        let data = self.backend.fetch_voting_data().await?;
        debug!(
            "Voting page: {} entries ({} with media), voting open: {}",
            data.entries.len(),
            data.entries.iter().filter(|e| e.has_media()).count(),
            data.voting_open
        );

        embed(
            &self.template,
            &VotingPage {
                route: RouteName::Vote,
                data: &data,
                help_tips: resolve_help_tips(&data),
            },
        )
    }
}
