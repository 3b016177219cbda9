//! Boundary decoding for backend payloads.
//!
//! Each decoder parses one payload shape and then checks the invariants the
//! types alone cannot express. A payload that fails either step is rejected
//! whole, so views never render a partially valid record.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::entry::{AdminEntry, Entry};
use super::voting::VotingData;
use super::week::AdminData;
use crate::errors::DecodingError;

pub fn decode_voting_data(body: &str) -> Result<VotingData, DecodingError> {
    const RECORD: &str = "VotingData";
    let data: VotingData = parse(RECORD, body)?;

    if let Some(dup) = first_duplicate(data.vote_params.iter().map(String::as_str)) {
        return Err(invariant(RECORD, format!("voting parameter '{dup}' is listed twice")));
    }
    if let Some(dup) = first_duplicate(data.entries.iter().map(|e| e.uuid.as_str())) {
        return Err(invariant(RECORD, format!("entry '{dup}' appears twice")));
    }

    for param in data.help_tip_defs.keys() {
        if !data.has_param(param) {
            warn!("Help tips defined for unknown voting parameter '{param}'");
        }
    }

    Ok(data)
}

pub fn decode_admin_data(body: &str) -> Result<AdminData, DecodingError> {
    const RECORD: &str = "AdminData";
    let data: AdminData = parse(RECORD, body)?;

    check_week_entries(RECORD, "this week", &data.this_week().entries)?;
    check_week_entries(RECORD, "next week", &data.next_week().entries)?;

    Ok(data)
}

pub fn decode_entry(body: &str) -> Result<Entry, DecodingError> {
    parse("Entry", body)
}

pub fn decode_allowed_hosts(body: &str) -> Result<Vec<String>, DecodingError> {
    parse("allowed hosts", body)
}

fn parse<T: DeserializeOwned>(record: &'static str, body: &str) -> Result<T, DecodingError> {
    serde_json::from_str(body).map_err(|source| DecodingError::Malformed { record, source })
}

fn invariant(record: &'static str, message: String) -> DecodingError {
    DecodingError::Invariant { record, message }
}

fn check_week_entries(
    record: &'static str,
    week: &str,
    entries: &[AdminEntry],
) -> Result<(), DecodingError> {
    match first_duplicate(entries.iter().map(|e| e.entry.uuid.as_str())) {
        Some(dup) => Err(invariant(record, format!("entry '{dup}' appears twice in {week}"))),
        None => Ok(()),
    }
}

fn first_duplicate<'a>(items: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}
