use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::EntryVotingData;

/// Help text per voting parameter, then per rating.
pub type HelpTipDefs = BTreeMap<String, BTreeMap<u8, String>>;

/// Payload driving the voting view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingData {
    pub entries: Vec<EntryVotingData>,
    pub theme: String,
    pub date: String,
    pub submissions_open: bool,
    pub voting_open: bool,
    pub vote_params: Vec<String>,
    pub help_tip_defs: HelpTipDefs,
}

impl VotingData {
    pub fn entry(&self, uuid: &str) -> Option<&EntryVotingData> {
        self.entries.iter().find(|e| e.uuid == uuid)
    }

    pub fn has_param(&self, param: &str) -> bool {
        self.vote_params.iter().any(|p| p == param)
    }

    /// Help text for a rating, falling back to the bare rating number.
    pub fn help_tip(&self, param: &str, rating: u8) -> Cow<'_, str> {
        self.help_tip_defs
            .get(param)
            .and_then(|tips| tips.get(&rating))
            .map(|tip| Cow::Borrowed(tip.as_str()))
            .unwrap_or_else(|| Cow::Owned(rating.to_string()))
    }
}

/// One rating cast by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVote {
    #[serde(rename = "entryUUID")]
    pub entry_uuid: String,
    #[serde(rename = "voteForName")]
    pub vote_for_name: String,
    #[serde(rename = "voteParam")]
    pub vote_param: String,
    pub rating: u8,
}

/// Body of a vote submission: the voter's link key and every rating they cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmission {
    pub vote_key: String,
    pub votes: Vec<UserVote>,
}
