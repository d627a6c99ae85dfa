use anyhow::Result;
use std::sync::Arc;
use tracing::*;

use leaderboard::{JsonFileStorage, Leaderboard, UserRecord};
use upstream::{Fetched, LeetCodeClient, MatchedUser, Upstream};

use super::ApiError;
use crate::config::Config;

pub struct AppState {
    upstream: Arc<dyn Upstream>,
    leaderboard: Arc<Leaderboard>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>, leaderboard: Leaderboard) -> Self {
        Self {
            upstream,
            leaderboard: Arc::new(leaderboard),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let upstream = LeetCodeClient::new(&config.upstream_url)?;
        let storage = JsonFileStorage::new(config.leaderboard_path());

        Ok(Self::new(Arc::new(upstream), Leaderboard::new(Box::new(storage))))
    }

    /// Fetches a single profile and records it on the leaderboard.
    pub async fn lookup(&self, username: &str) -> Result<Fetched, ApiError> {
        let fetched = self
            .upstream
            .fetch_profile(username)
            .await
            .map_err(ApiError::FetchFailed)?;

        match fetched.matched_user() {
            Some(user) => self.record(user).await,
            None => {
                info!(%username, "lookup:not-found");
                return Err(ApiError::UserNotFound);
            }
        }

        Ok(fetched)
    }

    /// Fetches both profiles concurrently. Leaves the leaderboard alone.
    pub async fn compare(&self, first: &str, second: &str) -> Result<(Fetched, Fetched), ApiError> {
        let (first, second) = futures::join!(
            self.upstream.fetch_profile(first),
            self.upstream.fetch_profile(second)
        );

        let first = first.map_err(ApiError::ComparisonFailed)?;
        let second = second.map_err(ApiError::ComparisonFailed)?;

        if first.matched_user().is_none() || second.matched_user().is_none() {
            return Err(ApiError::UsersNotFound);
        }

        Ok((first, second))
    }

    pub async fn leaderboard(&self) -> Vec<UserRecord> {
        let leaderboard = self.leaderboard.clone();

        match tokio::task::spawn_blocking(move || leaderboard.entries()).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("leaderboard:join {:?}", e);
                Vec::new()
            }
        }
    }

    async fn record(&self, user: &MatchedUser) {
        let record = user_record(user);
        let leaderboard = self.leaderboard.clone();

        match tokio::task::spawn_blocking(move || leaderboard.record(record)).await {
            Ok(Ok(entries)) => debug!(entries = entries.len(), "leaderboard:updated"),
            Ok(Err(e)) => warn!("leaderboard:record {:?}", e),
            Err(e) => warn!("leaderboard:join {:?}", e),
        }
    }
}

pub fn user_record(user: &MatchedUser) -> UserRecord {
    UserRecord::new(&user.username, user.total_solved())
        .ranking(user.ranking())
        .avatar(user.avatar().map(str::to_owned))
}
