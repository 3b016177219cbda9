//! Backend client — typed access to the voting backend's JSON API.
//!
//! Every payload is decoded through `contracts::decode`, so callers only ever
//! see records that passed the contract checks.

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::contracts::decode::{
    decode_admin_data, decode_allowed_hosts, decode_entry, decode_voting_data,
};
use crate::contracts::{AdminData, Entry, VoteSubmission, VotingData};
use crate::errors::DecodingError;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),

    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/entry_data — this week's votable entries.
    pub async fn fetch_voting_data(&self) -> Result<VotingData, BackendError> {
        let body = self.get(&["api", "entry_data"]).await?;
        Ok(decode_voting_data(&body)?)
    }

    /// GET /api/entry_data/{key} — the entry an edit link points at.
    pub async fn fetch_editable_entry(&self, edit_key: &str) -> Result<Entry, BackendError> {
        let body = self.get(&["api", "entry_data", edit_key]).await?;
        Ok(decode_entry(&body)?)
    }

    /// GET /api/admin/get_admin_data/{key}
    pub async fn fetch_admin_data(&self, admin_key: &str) -> Result<AdminData, BackendError> {
        let body = self
            .get(&["api", "admin", "get_admin_data", admin_key])
            .await?;
        Ok(decode_admin_data(&body)?)
    }

    /// GET /api/admin/get_preview_data/{key} — next week's entries as voters will see them.
    pub async fn fetch_preview_data(&self, admin_key: &str) -> Result<VotingData, BackendError> {
        let body = self
            .get(&["api", "admin", "get_preview_data", admin_key])
            .await?;
        Ok(decode_voting_data(&body)?)
    }

    /// GET /api/allowed_hosts — link prefixes accepted for externally hosted audio.
    pub async fn fetch_allowed_hosts(&self) -> Result<Vec<String>, BackendError> {
        let body = self.get(&["api", "allowed_hosts"]).await?;
        Ok(decode_allowed_hosts(&body)?)
    }

    /// POST /api/submit_vote
    pub async fn submit_vote(&self, submission: &VoteSubmission) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(&["api", "submit_vote"])?)
            .json(submission)
            .send()
            .await?;
        Self::read_body(response).await.map(|_| ())
    }

    /// Appends `segments` to the base URL. Each segment is percent-encoded whole,
    /// so keys taken from links cannot add path components or a query.
    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let invalid = || BackendError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> Result<String, BackendError> {
        let url = self.url(segments)?;
        debug!("GET {}", url.path());
        let response = self.client.get(url).send().await?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend returned {status}: {body}");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{admin_payload, spawn_backend, voting_payload};
    use super::*;
    use axum::{
        extract::{Path, RawQuery},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_fetch_voting_data() {
        let backend =
            spawn_backend(Router::new().route("/api/entry_data", get(|| async { Json(voting_payload()) })))
                .await;

        let data = backend.fetch_voting_data().await.unwrap();
        assert_eq!(data.theme, "Week 42: Lullabies");
        assert_eq!(data.entries.len(), 2);
        assert_eq!(
            data.entry("e1").and_then(|e| e.pdf_url.as_deref()),
            Some("/files/e1/score.pdf")
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decoding_error() {
        let backend = spawn_backend(Router::new().route(
            "/api/entry_data",
            get(|| async {
                let mut payload = voting_payload();
                payload["entries"][0]["mp3Format"] = json!("wav");
                Json(payload)
            }),
        ))
        .await;

        let result = backend.fetch_voting_data().await;
        assert!(matches!(result, Err(BackendError::Decoding(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_key_keeps_status() {
        let backend = spawn_backend(Router::new().route(
            "/api/admin/get_admin_data/:key",
            get(|| async { (StatusCode::UNAUTHORIZED, "Invalid or expired admin link") }),
        ))
        .await;

        match backend.fetch_admin_data("expired").await {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid or expired admin link");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_keys_are_passed_in_path() {
        let backend = spawn_backend(
            Router::new()
                .route(
                    "/api/admin/get_admin_data/:key",
                    get(|Path(key): Path<String>| async move {
                        assert_eq!(key, "adm1n");
                        Json(admin_payload())
                    }),
                )
                .route(
                    "/api/entry_data/:key",
                    get(|Path(key): Path<String>| async move {
                        Json(json!({
                            "uuid": format!("entry-for-{key}"),
                            "entryName": "",
                            "entrantName": "wiglaf",
                            "pdfUrl": null,
                            "mp3Format": null,
                            "mp3Url": null
                        }))
                    }),
                ),
        )
        .await;

        let admin = backend.fetch_admin_data("adm1n").await.unwrap();
        assert_eq!(admin.votes[0].user_name, "wilm0x42");
        assert_eq!(admin.next_week().entries[0].entry.entrant_name, "late");

        let entry = backend.fetch_editable_entry("ed1t").await.unwrap();
        assert_eq!(entry.uuid, "entry-for-ed1t");
    }

    #[tokio::test]
    async fn test_submit_vote_posts_camel_case_body() {
        let received: Arc<Mutex<Option<Value>>> = Arc::default();
        let sink = received.clone();
        let backend = spawn_backend(Router::new().route(
            "/api/submit_vote",
            post(move |Json(body): Json<Value>| async move {
                *sink.lock().unwrap() = Some(body);
                "FRICK yeah"
            }),
        ))
        .await;

        let submission = VoteSubmission {
            vote_key: "v0t3".to_string(),
            votes: vec![crate::contracts::UserVote {
                entry_uuid: "e1".to_string(),
                vote_for_name: "wiglaf".to_string(),
                vote_param: "overall".to_string(),
                rating: 5,
            }],
        };
        backend.submit_vote(&submission).await.unwrap();

        let body = received.lock().unwrap().clone().unwrap();
        assert_eq!(body["voteKey"], "v0t3");
        assert_eq!(body["votes"][0]["entryUUID"], "e1");
    }

    #[tokio::test]
    async fn test_keys_cannot_leave_their_path_segment() {
        let listing_hits = Arc::new(AtomicUsize::new(0));
        let hits = listing_hits.clone();
        let backend = spawn_backend(
            Router::new()
                .route(
                    "/api/entry_data",
                    get(move || async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Json(voting_payload())
                    }),
                )
                .route(
                    "/api/admin/get_admin_data/:key",
                    get(|Path(key): Path<String>| async move {
                        assert_eq!(key, "../../entry_data");
                        Json(admin_payload())
                    }),
                )
                .route(
                    "/api/entry_data/:key",
                    get(|Path(key): Path<String>, RawQuery(query): RawQuery| async move {
                        assert!(query.is_none());
                        Json(json!({
                            "uuid": key,
                            "entryName": "",
                            "entrantName": "wiglaf",
                            "pdfUrl": null,
                            "mp3Format": null,
                            "mp3Url": null
                        }))
                    }),
                ),
        )
        .await;

        backend.fetch_admin_data("../../entry_data").await.unwrap();
        let entry = backend.fetch_editable_entry("x?y=1").await.unwrap();

        assert_eq!(entry.uuid, "x?y=1");
        assert_eq!(listing_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_base_url_path_is_kept() {
        let backend = BackendClient::new("http://localhost:8251/wvote/");
        let url = backend.url(&["api", "entry_data", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8251/wvote/api/entry_data/a%20b%2Fc");
    }

    #[test]
    fn test_unparseable_base_url_is_error() {
        let backend = BackendClient::new("not a url");
        assert!(matches!(
            backend.url(&["api", "entry_data"]),
            Err(BackendError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(BackendClient::new("http://localhost:8251/").base_url(), "http://localhost:8251");
    }
}
