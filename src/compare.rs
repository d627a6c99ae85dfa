use anyhow::{anyhow, Result};
use clap::Args;

use dashboard::{Action, Dashboard, JsonStateStorage};
use metrics::{validate_pair, Comparison, ProfileSummary, Verdict};
use upstream::{Difficulty, Fetched};

use crate::{
    config::{Config, ConfigArgs},
    serve::AppState,
};

#[derive(Debug, Args)]
pub struct Command {
    first: String,
    second: String,
    #[command(flatten)]
    config: ConfigArgs,
}

fn summarize(fetched: &Fetched) -> Result<ProfileSummary> {
    fetched
        .data()
        .and_then(ProfileSummary::from_data)
        .ok_or_else(|| anyhow!("One or both users not found"))
}

#[tokio::main]
pub async fn execute_command(cmd: &Command) -> Result<()> {
    let config = Config::from_env()?.with_args(&cmd.config);
    let (first, second) = validate_pair(&cmd.first, &cmd.second)?;

    let state = AppState::from_config(&config)?;
    let (first, second) = state.compare(first, second).await?;

    let comparison = Comparison::new(summarize(&first)?, summarize(&second)?);

    let mut dashboard = Dashboard::open(JsonStateStorage::new(&config.state_path));
    dashboard.dispatch(Action::AddToHistory(comparison.second.username.clone()))?;
    dashboard.dispatch(Action::AddToHistory(comparison.first.username.clone()))?;
    dashboard.close()?;

    print_comparison(&comparison);

    Ok(())
}

fn marked(value: String, side: Verdict, leader: Option<Verdict>) -> String {
    if leader == Some(side) {
        format!("{} *", value)
    } else {
        value
    }
}

fn row(label: &str, first: String, second: String, leader: Option<Verdict>) {
    println!(
        "{:<16}{:>14}   vs {:>14}",
        label,
        marked(first, Verdict::First, leader),
        marked(second, Verdict::Second, leader)
    );
}

fn ranking(summary: &ProfileSummary) -> String {
    match summary.ranking {
        Some(ranking) if ranking > 0 => format!("#{}", ranking),
        _ => "N/A".to_owned(),
    }
}

pub fn print_comparison(comparison: &Comparison) {
    let (a, b) = (&comparison.first, &comparison.second);

    row("", a.username.clone(), b.username.clone(), None);
    row(
        "Total Solved",
        a.total_solved.to_string(),
        b.total_solved.to_string(),
        comparison.solved_leader(Difficulty::All),
    );
    row(
        "Global Ranking",
        ranking(a),
        ranking(b),
        comparison.ranking_leader(),
    );
    row(
        "Hard Problems",
        a.solved(Difficulty::Hard).to_string(),
        b.solved(Difficulty::Hard).to_string(),
        comparison.solved_leader(Difficulty::Hard),
    );
    row(
        "Acceptance Rate",
        format!("{}%", a.acceptance_rate),
        format!("{}%", b.acceptance_rate),
        comparison.leader_by(|s| s.acceptance_rate),
    );

    println!();

    for (left, right) in a.progress.iter().zip(b.progress.iter()) {
        row(
            &left.difficulty,
            format!("{}/{} {}%", left.solved, left.total, left.percentage),
            format!("{}/{} {}%", right.solved, right.total, right.percentage),
            None,
        );
    }

    println!();
    println!("{}", comparison.summary());
}
