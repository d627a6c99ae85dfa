use anyhow::{anyhow, Result};
use clap::Args;
use itertools::Itertools;
use tracing::*;

use dashboard::{Action, Dashboard, JsonStateStorage};
use metrics::{format_count, validate_username, ProfileSummary};

use crate::{
    config::{Config, ConfigArgs},
    serve::AppState,
};

#[derive(Debug, Args)]
pub struct Command {
    username: String,
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
pub async fn execute_command(cmd: &Command) -> Result<()> {
    let config = Config::from_env()?.with_args(&cmd.config);
    let username = validate_username(&cmd.username)?;

    config.ensure_data_dir()?;

    let state = AppState::from_config(&config)?;
    let fetched = state.lookup(username).await?;
    let summary = fetched
        .data()
        .and_then(ProfileSummary::from_data)
        .ok_or_else(|| anyhow!("User not found on LeetCode"))?;

    let mut dashboard = Dashboard::open(JsonStateStorage::new(&config.state_path));
    dashboard.dispatch(Action::AddToHistory(summary.username.clone()))?;
    dashboard.dispatch(Action::SetCurrentUser(Some(summary.username.clone())))?;

    print_summary(&summary, dashboard.state().is_favorite(&summary.username));

    dashboard.close()?;

    debug!(%username, "profile:done");

    Ok(())
}

pub fn print_summary(summary: &ProfileSummary, favorite: bool) {
    let star = if favorite { " *" } else { "" };
    match &summary.real_name {
        Some(real_name) => println!("{}{} ({})", summary.username, star, real_name),
        None => println!("{}{}", summary.username, star),
    }

    match summary.ranking {
        Some(ranking) if ranking > 0 => println!("Rank #{}", ranking),
        _ => println!("Rank N/A"),
    }

    println!(
        "Solved {}  Submissions {}  Acceptance {}%",
        summary.total_solved,
        format_count(summary.total_submissions),
        summary.acceptance_rate
    );
    println!();

    for progress in &summary.progress {
        println!(
            "{:<8}{:>5} / {:<5}{:>4}%",
            progress.difficulty, progress.solved, progress.total, progress.percentage
        );
    }

    if !summary.languages.is_empty() {
        println!();
        println!(
            "Languages: {}",
            summary
                .languages
                .iter()
                .map(|l| format!("{} {}", l.language, l.solved))
                .join(", ")
        );
    }

    if !summary.skills.is_empty() {
        println!(
            "Skills: {}",
            summary
                .skills
                .iter()
                .map(|s| format!("{} {}", s.tag_name, s.problems_solved))
                .join(", ")
        );
    }
}
