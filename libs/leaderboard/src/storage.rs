use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tempfile::NamedTempFile;
use tracing::*;

use crate::UserRecord;

pub trait LeaderboardStorage: Send + Sync {
    fn load(&self) -> Result<Vec<UserRecord>>;
    fn save(&self, records: &[UserRecord]) -> Result<()>;
}

pub const LEADERBOARD_FILE: &str = "users.json";

/// Writes pretty JSON beside `path` and renames it into place, readers never
/// see a partial file.
pub fn write_json_atomically<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&dir)?;

    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
    file.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;

    Ok(())
}

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_directory(dir: &Path) -> Self {
        Self::new(dir.join(LEADERBOARD_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<UserRecord>> {
        if !self.path.exists() {
            trace!(path = %self.path.display(), "leaderboard:missing");
            return Ok(Vec::new());
        }

        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;

        Ok(serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?)
    }

    fn save(&self, records: &[UserRecord]) -> Result<()> {
        write_json_atomically(&self.path, records)?;

        debug!(path = %self.path.display(), records = records.len(), "leaderboard:saved");

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<UserRecord>>,
}

impl MemoryStorage {
    pub fn with(records: Vec<UserRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl LeaderboardStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<UserRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;

        Ok(records.clone())
    }

    fn save(&self, records: &[UserRecord]) -> Result<()> {
        let mut saved = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;

        *saved = records.to_vec();

        Ok(())
    }
}
