use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::*;

use upstream::UpstreamError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Username is required")]
    UsernameRequired,
    #[error("Two usernames required")]
    UsernamesRequired,
    #[error("Malformed payload")]
    MalformedPayload(#[from] JsonRejection),
    #[error("User not found on LeetCode")]
    UserNotFound,
    #[error("One or both users not found")]
    UsersNotFound,
    #[error("Failed to fetch data from LeetCode")]
    FetchFailed(#[source] UpstreamError),
    #[error("Comparison failed")]
    ComparisonFailed(#[source] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UsernameRequired
            | ApiError::UsernamesRequired
            | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound | ApiError::UsersNotFound => StatusCode::NOT_FOUND,
            ApiError::FetchFailed(_) | ApiError::ComparisonFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::MalformedPayload(rejection) => Some(rejection.body_text()),
            ApiError::FetchFailed(e) | ApiError::ComparisonFailed(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.details() {
            Some(details) => {
                if status.is_server_error() {
                    warn!(%details, "{}", self);
                }
                json!({ "error": self.to_string(), "details": details })
            }
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
