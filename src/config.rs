use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::*;

use leaderboard::LEADERBOARD_FILE;
use upstream::LEETCODE_GRAPHQL_URL;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub upstream_url: String,
    pub state_path: PathBuf,
}

#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Directory holding the leaderboard file.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// GraphQL endpoint profiles are fetched from.
    #[arg(long, value_name = "URL")]
    pub upstream_url: Option<String>,
    /// File the session state (history, favorites) is kept in.
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT '{}'", port))?,
            None => DEFAULT_PORT,
        };

        let data_dir: PathBuf = lookup("LEETMETRIC_DATA_DIR")
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned())
            .into();

        let upstream_url =
            lookup("LEETMETRIC_UPSTREAM_URL").unwrap_or_else(|| LEETCODE_GRAPHQL_URL.to_owned());

        let state_path = lookup("LEETMETRIC_STATE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(STATE_FILE));

        Ok(Self {
            port,
            data_dir,
            upstream_url,
            state_path,
        })
    }

    pub fn with_args(self, args: &ConfigArgs) -> Self {
        // An explicit data directory moves the default state file along with it.
        let state_path = match (&args.state, &args.data_dir) {
            (Some(state), _) => state.clone(),
            (None, Some(dir)) if self.state_path == self.data_dir.join(STATE_FILE) => {
                dir.join(STATE_FILE)
            }
            _ => self.state_path,
        };

        Self {
            port: self.port,
            data_dir: args.data_dir.clone().unwrap_or(self.data_dir),
            upstream_url: args.upstream_url.clone().unwrap_or(self.upstream_url),
            state_path,
        }
    }

    pub fn with_port(self, port: Option<u16>) -> Self {
        Self {
            port: port.unwrap_or(self.port),
            ..self
        }
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(LEADERBOARD_FILE)
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            info!(dir = %self.data_dir.display(), "creating data directory");
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("creating {}", self.data_dir.display()))?;
        }

        Ok(())
    }
}
