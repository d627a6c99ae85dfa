use anyhow::Result;
use clap::{Args, Subcommand};

use dashboard::{Action, Dashboard, JsonStateStorage};
use metrics::validate_username;

use crate::config::{Config, ConfigArgs};

#[derive(Debug, Subcommand)]
pub enum Favorite {
    Add { username: String },
    Remove { username: String },
}

#[derive(Debug, Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    favorite: Favorite,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Args)]
pub struct HistoryCommand {
    #[command(flatten)]
    config: ConfigArgs,
}

pub fn execute_favorite(cmd: &FavoriteCommand) -> Result<()> {
    let config = Config::from_env()?.with_args(&cmd.config);
    let mut dashboard = Dashboard::open(JsonStateStorage::new(&config.state_path));

    let action = match &cmd.favorite {
        Favorite::Add { username } => {
            Action::AddToFavorites(validate_username(username)?.to_owned())
        }
        Favorite::Remove { username } => Action::RemoveFromFavorites(username.trim().to_owned()),
    };

    let state = dashboard.dispatch(action)?;
    println!("Favorites: {}", state.favorites.join(", "));

    dashboard.close()?;

    Ok(())
}

pub fn execute_history(cmd: &HistoryCommand) -> Result<()> {
    let config = Config::from_env()?.with_args(&cmd.config);
    let dashboard = Dashboard::open(JsonStateStorage::new(&config.state_path));
    let state = dashboard.state();

    println!("Recent searches:");
    for username in &state.search_history {
        let star = if state.is_favorite(username) { " *" } else { "" };
        println!("  {}{}", username, star);
    }

    println!("Favorites:");
    for username in &state.favorites {
        println!("  {}", username);
    }

    Ok(())
}
