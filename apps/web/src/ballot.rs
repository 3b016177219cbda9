use std::collections::HashSet;

use thiserror::Error;

use crate::contracts::{UserVote, VotingData};

/// Highest rating a voter can give. A rating of 0 clears a previous rating.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BallotError {
    #[error("Voting is currently closed")]
    VotingClosed,

    #[error("Rating {rating} for '{param}' is outside 0..=5")]
    RatingOutOfRange { param: String, rating: u8 },

    #[error("'{0}' is not a voting parameter this week")]
    UnknownParam(String),

    #[error("No entry with id '{0}' is up for voting")]
    UnknownEntry(String),

    #[error("Entry '{entry}' was rated on '{param}' more than once")]
    Duplicate { entry: String, param: String },
}

/// Checks a voter's ratings against this week's voting data before they are forwarded.
pub fn validate_ballot(votes: &[UserVote], voting: &VotingData) -> Result<(), BallotError> {
    if !voting.voting_open {
        return Err(BallotError::VotingClosed);
    }

    let mut seen = HashSet::new();
    for vote in votes {
        if vote.rating > MAX_RATING {
            return Err(BallotError::RatingOutOfRange {
                param: vote.vote_param.clone(),
                rating: vote.rating,
            });
        }
        if !voting.has_param(&vote.vote_param) {
            return Err(BallotError::UnknownParam(vote.vote_param.clone()));
        }
        if voting.entry(&vote.entry_uuid).is_none() {
            return Err(BallotError::UnknownEntry(vote.entry_uuid.clone()));
        }
        if !seen.insert((vote.entry_uuid.as_str(), vote.vote_param.as_str())) {
            return Err(BallotError::Duplicate {
                entry: vote.entry_uuid.clone(),
                param: vote.vote_param.clone(),
            });
        }
    }

    Ok(())
}

/// Number of ratings that actually score an entry (0 means "cleared").
pub fn scored_count(votes: &[UserVote]) -> usize {
    votes.iter().filter(|v| v.rating != 0).count()
}
