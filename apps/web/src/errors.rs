use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::navigator::routes::RouteName;

/// The requested path matches no route.
#[derive(Debug, Error)]
#[error("No route matches '{path}'")]
pub struct NavigationError {
    pub path: String,
}

/// A view could not be loaded on activation.
#[derive(Debug, Error)]
pub enum ModuleLoadError {
    #[error("No view registered for route '{0}'")]
    Unregistered(RouteName),

    #[error("Failed to load view asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("View asset {path} has no data slot")]
    MissingSlot { path: PathBuf },
}

/// A backend payload does not conform to the data contracts.
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("Malformed {record} payload: {source}")]
    Malformed {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {record} payload: {message}")]
    Invariant {
        record: &'static str,
        message: String,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decoding(e) => AppError::Decoding(e),
            BackendError::Status { status: 401, .. } => AppError::Unauthorized,
            BackendError::Status {
                status: 404,
                message,
            } => AppError::NotFound(message),
            BackendError::Status {
                status: 400,
                message,
            } => AppError::Validation(message),
            other => AppError::Backend(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Navigation(e) => (StatusCode::NOT_FOUND, "NAVIGATION_ERROR", e.to_string()),
            AppError::ModuleLoad(e) => {
                tracing::error!("View load failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODULE_LOAD_ERROR",
                    "This page could not be loaded".to_string(),
                )
            }
            AppError::Decoding(e) => {
                tracing::error!("Decoding error: {e}");
                (StatusCode::BAD_GATEWAY, "DECODING_ERROR", e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid or expired link".to_string(),
            ),
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The voting backend is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
