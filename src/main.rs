use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod board;
mod compare;
mod config;
mod favorites;
mod profile;
mod serve;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server.
    Serve(serve::Command),
    /// Fetch a profile and record it on the leaderboard.
    Profile(profile::Command),
    /// Compare two profiles side by side.
    Compare(compare::Command),
    /// Show the stored leaderboard.
    Leaderboard(board::Command),
    /// Add or remove a favorite user.
    Favorite(favorites::FavoriteCommand),
    /// Show recent searches and favorites.
    History(favorites::HistoryCommand),
}

fn get_rust_log() -> String {
    let mut original = std::env::var("RUST_LOG").unwrap_or_else(|_| "leetmetric=info".into());

    if !original.contains("tower_http=") {
        original.push_str(",tower_http=info");
    }

    original
}

fn main() -> Result<()> {
    color_backtrace::install();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(get_rust_log()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("initialized, ready");

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Serve(cmd)) => serve::execute_command(cmd),
        Some(Commands::Profile(cmd)) => profile::execute_command(cmd),
        Some(Commands::Compare(cmd)) => compare::execute_command(cmd),
        Some(Commands::Leaderboard(cmd)) => board::execute_command(cmd),
        Some(Commands::Favorite(cmd)) => favorites::execute_favorite(cmd),
        Some(Commands::History(cmd)) => favorites::execute_history(cmd),
        None => Ok(()),
    }
}
