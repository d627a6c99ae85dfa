use anyhow::Result;
use clap::Args;

use leaderboard::{JsonFileStorage, Leaderboard};

use crate::config::{Config, ConfigArgs};

#[derive(Debug, Args)]
pub struct Command {
    /// Only show the first N entries.
    #[arg(short, long)]
    limit: Option<usize>,
    #[command(flatten)]
    config: ConfigArgs,
}

pub fn execute_command(cmd: &Command) -> Result<()> {
    let config = Config::from_env()?.with_args(&cmd.config);
    let leaderboard = Leaderboard::new(Box::new(JsonFileStorage::new(config.leaderboard_path())));

    let entries = leaderboard.entries();
    if entries.is_empty() {
        println!("No users yet.");
        return Ok(());
    }

    for (position, entry) in entries
        .iter()
        .take(cmd.limit.unwrap_or(entries.len()))
        .enumerate()
    {
        let ranking = entry
            .ranking
            .map(|r| format!("#{}", r))
            .unwrap_or_else(|| "N/A".to_owned());

        println!(
            "{:>3}. {:<16}{:>6} solved  {:>10}  {}",
            position + 1,
            entry.username,
            entry.total_solved,
            ranking,
            entry.last_updated.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
