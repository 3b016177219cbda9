use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::ballot::{scored_count, validate_ballot};
use crate::contracts::VoteSubmission;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/submit_vote
///
/// Checks the ballot against this week's voting data, then forwards it to the backend,
/// which owns the voter's key and stores the ratings.
pub async fn handle_submit_vote(
    State(state): State<AppState>,
    Json(submission): Json<VoteSubmission>,
) -> Result<StatusCode, AppError> {
    let voting = state.backend.fetch_voting_data().await?;

    validate_ballot(&submission.votes, &voting)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    info!(
        "Forwarding ballot: {} ratings ({} scored)",
        submission.votes.len(),
        scored_count(&submission.votes)
    );
    state.backend.submit_vote(&submission).await?;

    Ok(StatusCode::NO_CONTENT)
}
