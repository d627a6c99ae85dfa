use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::*;

pub mod storage;

pub use storage::*;

pub const MAXIMUM_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub total_solved: u64,
    #[serde(default)]
    pub ranking: Option<u64>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: &str, total_solved: u64) -> Self {
        Self {
            username: username.to_owned(),
            total_solved,
            ranking: None,
            avatar: None,
            last_updated: Utc::now(),
        }
    }

    pub fn ranking(self, ranking: Option<u64>) -> Self {
        Self { ranking, ..self }
    }

    pub fn avatar(self, avatar: Option<String>) -> Self {
        Self { avatar, ..self }
    }

    pub fn updated_at(self, last_updated: DateTime<Utc>) -> Self {
        Self {
            last_updated,
            ..self
        }
    }
}

/// Inserts or replaces `candidate` by username, then keeps the top `capacity`
/// records ordered by solved count. The sort is stable, so ties keep their
/// existing order.
pub fn rank(
    mut records: Vec<UserRecord>,
    candidate: UserRecord,
    capacity: usize,
) -> Vec<UserRecord> {
    match records
        .iter()
        .position(|r| r.username == candidate.username)
    {
        Some(index) => records[index] = candidate,
        None => records.push(candidate),
    }

    records.sort_by(|a, b| b.total_solved.cmp(&a.total_solved));
    records.truncate(capacity);

    records
}

pub struct Leaderboard {
    storage: Box<dyn LeaderboardStorage>,
    capacity: usize,
    writing: Mutex<()>,
}

impl Leaderboard {
    pub fn new(storage: Box<dyn LeaderboardStorage>) -> Self {
        Self::with_capacity(storage, MAXIMUM_ENTRIES)
    }

    pub fn with_capacity(storage: Box<dyn LeaderboardStorage>, capacity: usize) -> Self {
        Self {
            storage,
            capacity,
            writing: Mutex::new(()),
        }
    }

    /// Never fails, unreadable storage reads as an empty board.
    pub fn entries(&self) -> Vec<UserRecord> {
        match self.storage.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("leaderboard:load {:?}", e);
                Vec::new()
            }
        }
    }

    pub fn record(&self, candidate: UserRecord) -> Result<Vec<UserRecord>> {
        // Load, modify and save happen under one guard so concurrent requests
        // can't drop each other's entries.
        let _writing = self
            .writing
            .lock()
            .map_err(|_| anyhow::anyhow!("leaderboard writer poisoned"))?;

        debug!(
            username = %candidate.username,
            solved = candidate.total_solved,
            "leaderboard:record"
        );

        let records = rank(self.entries(), candidate, self.capacity);

        self.storage.save(&records)?;

        Ok(records)
    }
}
