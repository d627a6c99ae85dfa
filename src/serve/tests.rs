use anyhow::Result;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use futures::future::BoxFuture;
use serde_json::{json, Value as JsonValue};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::Barrier;
use tower::ServiceExt;

use leaderboard::{JsonFileStorage, Leaderboard, LeaderboardStorage, MemoryStorage, UserRecord};
use upstream::{fixtures::*, Fetched, Upstream, UpstreamError};

use super::*;

#[derive(Default)]
struct FakeUpstream {
    profiles: HashMap<String, JsonValue>,
    failing: HashSet<String>,
    barrier: Option<Arc<Barrier>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeUpstream {
    fn profile(
        mut self,
        username: &str,
        ranking: Option<u64>,
        easy: u64,
        medium: u64,
        hard: u64,
    ) -> Self {
        self.profiles.insert(
            username.to_owned(),
            profile_payload(username, ranking, easy, medium, hard),
        );
        self
    }

    fn failing(mut self, username: &str) -> Self {
        self.failing.insert(username.to_owned());
        self
    }

    /// Every fetch waits until `parties` fetches are in flight at once.
    fn rendezvous(self, parties: usize) -> Self {
        Self {
            barrier: Some(Arc::new(Barrier::new(parties))),
            ..self
        }
    }
}

impl Upstream for FakeUpstream {
    fn fetch_profile<'a>(
        &'a self,
        username: &'a str,
    ) -> BoxFuture<'a, Result<Fetched, UpstreamError>> {
        Box::pin(async move {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(username.to_owned());
            }

            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }

            if self.failing.contains(username) {
                return Err(UpstreamError::Status(503));
            }

            match self.profiles.get(username) {
                Some(payload) => Fetched::from_value(payload.clone()),
                None => Fetched::from_value(unmatched_payload()),
            }
        })
    }
}

struct UnwritableStorage;

impl LeaderboardStorage for UnwritableStorage {
    fn load(&self) -> Result<Vec<UserRecord>> {
        Ok(Vec::new())
    }

    fn save(&self, _records: &[UserRecord]) -> Result<()> {
        Err(anyhow::anyhow!("read-only file system"))
    }
}

fn app(upstream: FakeUpstream) -> Router {
    app_with_storage(upstream, Box::<MemoryStorage>::default())
}

fn app_with_storage(upstream: FakeUpstream, storage: Box<dyn LeaderboardStorage>) -> Router {
    let state = AppState::new(Arc::new(upstream), Leaderboard::new(storage));

    create_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, JsonValue)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await?;

    Ok((status, serde_json::from_slice(&body)?))
}

async fn post(app: &Router, uri: &str, body: JsonValue) -> Result<(StatusCode, JsonValue)> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> Result<(StatusCode, JsonValue)> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

fn usernames(board: &JsonValue) -> Vec<&str> {
    board
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["username"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn it_requires_a_username() -> Result<()> {
    let app = app(FakeUpstream::default());

    for body in [
        json!({ "username": "" }),
        json!({ "username": "   " }),
        json!({}),
        json!({ "username": null }),
    ] {
        let (status, body) = post(&app, "/api/leetcode", body).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("required"));
    }

    Ok(())
}

#[tokio::test]
async fn it_forwards_usernames_as_given() -> Result<()> {
    let upstream = FakeUpstream::default().profile("alice", Some(1200), 10, 5, 1);
    let requested = Arc::clone(&upstream.requested);
    let app = app(upstream);

    let (status, _) = post(&app, "/api/leetcode", json!({ "username": " alice " })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&app, "/api/leetcode", json!({ "username": "alice" })).await?;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        *requested.lock().expect("requested names"),
        vec![" alice ".to_owned(), "alice".to_owned()]
    );

    Ok(())
}

#[tokio::test]
async fn it_rejects_bodies_that_are_not_json() -> Result<()> {
    let app = app(FakeUpstream::default());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/leetcode")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("username=alice"))?;

    let (status, body) = send(&app, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Malformed payload");

    Ok(())
}

#[tokio::test]
async fn it_reports_unknown_users() -> Result<()> {
    let app = app(FakeUpstream::default());

    let (status, body) = post(&app, "/api/leetcode", json!({ "username": "ghost" })).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found on LeetCode" }));

    let (_, board) = get(&app, "/api/leaderboard").await?;
    assert_eq!(board, json!([]));

    Ok(())
}

#[tokio::test]
async fn it_returns_the_upstream_payload_and_records_the_user() -> Result<()> {
    let app = app(FakeUpstream::default().profile("alice", Some(1234), 40, 25, 5));

    let (status, body) = post(&app, "/api/leetcode", json!({ "username": "alice" })).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, profile_payload("alice", Some(1234), 40, 25, 5));

    let (status, board) = get(&app, "/api/leaderboard").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&board), vec!["alice"]);
    assert_eq!(board[0]["totalSolved"], 70);
    assert_eq!(board[0]["ranking"], 1234);
    assert_eq!(board[0]["avatar"], avatar_url("alice"));
    assert!(board[0]["lastUpdated"].is_string());

    Ok(())
}

#[tokio::test]
async fn it_serves_an_empty_leaderboard_before_any_file_exists() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = JsonFileStorage::in_directory(dir.path());
    let app = app_with_storage(FakeUpstream::default(), Box::new(storage));

    let (status, board) = get(&app, "/api/leaderboard").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(board, json!([]));

    Ok(())
}

#[tokio::test]
async fn it_ranks_users_by_solved_count() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = JsonFileStorage::in_directory(dir.path());
    let app = app_with_storage(
        FakeUpstream::default()
            .profile("A", None, 50, 0, 0)
            .profile("B", None, 30, 30, 20),
        Box::new(storage),
    );

    post(&app, "/api/leetcode", json!({ "username": "A" })).await?;
    post(&app, "/api/leetcode", json!({ "username": "B" })).await?;
    post(&app, "/api/leetcode", json!({ "username": "A" })).await?;

    let (_, board) = get(&app, "/api/leaderboard").await?;
    assert_eq!(usernames(&board), vec!["B", "A"]);

    assert!(dir.path().join("users.json").exists());

    Ok(())
}

#[tokio::test]
async fn it_reports_upstream_failures() -> Result<()> {
    let app = app(FakeUpstream::default().failing("alice"));

    let (status, body) = post(&app, "/api/leetcode", json!({ "username": "alice" })).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch data from LeetCode");
    assert_eq!(body["details"], "LeetCode API error: 503");

    Ok(())
}

#[tokio::test]
async fn it_still_answers_when_the_leaderboard_cannot_be_written() -> Result<()> {
    let app = app_with_storage(
        FakeUpstream::default().profile("alice", None, 1, 1, 1),
        Box::new(UnwritableStorage),
    );

    let (status, _) = post(&app, "/api/leetcode", json!({ "username": "alice" })).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, board) = get(&app, "/api/leaderboard").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board, json!([]));

    Ok(())
}

#[tokio::test]
async fn it_compares_two_users() -> Result<()> {
    let app = app(
        FakeUpstream::default()
            .profile("alice", Some(100), 10, 5, 1)
            .profile("bob", None, 3, 2, 1),
    );

    let (status, body) = post(
        &app,
        "/api/compare",
        json!({ "user1": "alice", "user2": "bob" }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user1"], profile_payload("alice", Some(100), 10, 5, 1)["data"]);
    assert_eq!(body["user2"], profile_payload("bob", None, 3, 2, 1)["data"]);
    assert_eq!(body["allQuestionsCount"], all_questions_count());

    let (_, board) = get(&app, "/api/leaderboard").await?;
    assert_eq!(board, json!([]));

    Ok(())
}

#[tokio::test]
async fn it_fetches_both_users_at_once() -> Result<()> {
    let app = app(
        FakeUpstream::default()
            .profile("alice", None, 1, 0, 0)
            .profile("bob", None, 0, 1, 0)
            .rendezvous(2),
    );

    let (status, _) = tokio::time::timeout(
        Duration::from_secs(5),
        post(&app, "/api/compare", json!({ "user1": "alice", "user2": "bob" })),
    )
    .await??;

    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn it_requires_two_usernames_to_compare() -> Result<()> {
    let app = app(FakeUpstream::default());

    for body in [
        json!({ "user1": "alice" }),
        json!({ "user2": "bob" }),
        json!({ "user1": "", "user2": "bob" }),
    ] {
        let (status, body) = post(&app, "/api/compare", body).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Two usernames required" }));
    }

    Ok(())
}

#[tokio::test]
async fn it_reports_unknown_users_in_comparisons() -> Result<()> {
    let app = app(FakeUpstream::default().profile("alice", None, 1, 1, 1));

    let (status, body) = post(
        &app,
        "/api/compare",
        json!({ "user1": "alice", "user2": "ghost" }),
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "One or both users not found" }));

    Ok(())
}

#[tokio::test]
async fn it_reports_failed_comparisons() -> Result<()> {
    let app = app(
        FakeUpstream::default()
            .profile("alice", None, 1, 1, 1)
            .failing("bob"),
    );

    let (status, body) = post(
        &app,
        "/api/compare",
        json!({ "user1": "alice", "user2": "bob" }),
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Comparison failed");
    assert!(body["details"].is_string());

    Ok(())
}

#[tokio::test]
async fn it_answers_health_checks() -> Result<()> {
    let app = app(FakeUpstream::default());

    let (status, body) = get(&app, "/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    Ok(())
}
