use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::{collections::HashMap, sync::Arc};
use tracing::*;

use leaderboard::UserRecord;

use super::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileRequest {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompareRequest {
    #[serde(default)]
    user1: Option<String>,
    #[serde(default)]
    user2: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompareResponse {
    user1: JsonValue,
    user2: JsonValue,
    all_questions_count: JsonValue,
}

/// Blank names count as missing, others are forwarded untouched.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) async fn profile_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<JsonValue>, ApiError> {
    let Json(payload) = payload?;
    let username = required(payload.username).ok_or(ApiError::UsernameRequired)?;

    info!(%username, "profile");

    let fetched = state.lookup(&username).await?;

    Ok(Json(fetched.into_raw()))
}

pub(crate) async fn compare_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Json(payload) = payload?;
    let (Some(first), Some(second)) = (required(payload.user1), required(payload.user2)) else {
        return Err(ApiError::UsernamesRequired);
    };

    info!(%first, %second, "compare");

    let (first, second) = state.compare(&first, &second).await?;

    Ok(Json(CompareResponse {
        user1: first.raw_data(),
        user2: second.raw_data(),
        all_questions_count: first.raw_all_questions_count(),
    }))
}

pub(crate) async fn leaderboard_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<UserRecord>> {
    let entries = state.leaderboard().await;

    debug!(entries = entries.len(), "leaderboard");

    Json(entries)
}

fn empty_map() -> HashMap<String, String> {
    Default::default()
}

pub(crate) async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(empty_map()))
}
