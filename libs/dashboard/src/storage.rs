use anyhow::{Context, Result};
use leaderboard::write_json_atomically;
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};
use tracing::*;

use crate::{Action, DashboardState, PersistedState};

pub trait StateStorage {
    fn load(&self) -> Result<Option<PersistedState>>;
    fn save(&self, state: &PersistedState) -> Result<()>;
}

pub struct JsonStateStorage {
    path: PathBuf,
}

impl JsonStateStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for JsonStateStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;

        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        write_json_atomically(&self.path, state)
    }
}

#[derive(Default)]
pub struct MemoryStateStorage {
    saved: Mutex<Option<PersistedState>>,
    saves: AtomicUsize,
}

impl MemoryStateStorage {
    pub fn with(state: PersistedState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
            saves: AtomicUsize::default(),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl StateStorage for MemoryStateStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;

        Ok(saved.clone())
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage poisoned"))?;

        *saved = Some(state.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);

        Ok(())
    }
}

/// Session state bound to its storage. Opening rehydrates the persisted subset
/// and every dispatch that changes it writes it back.
pub struct Dashboard<S: StateStorage> {
    state: DashboardState,
    storage: S,
}

impl<S: StateStorage> Dashboard<S> {
    pub fn open(storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(persisted)) => DashboardState::default().reduce(Action::LoadState(persisted)),
            Ok(None) => DashboardState::default(),
            Err(e) => {
                warn!("dashboard:load {:?}", e);
                DashboardState::default()
            }
        };

        Self { state, storage }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn dispatch(&mut self, action: Action) -> Result<&DashboardState> {
        trace!(?action, "dashboard:dispatch");

        let before = self.state.persisted();
        self.state = std::mem::take(&mut self.state).reduce(action);

        let after = self.state.persisted();
        if before != after {
            self.storage.save(&after)?;
        }

        Ok(&self.state)
    }

    pub fn close(self) -> Result<S> {
        self.storage.save(&self.state.persisted())?;

        Ok(self.storage)
    }
}
