use serde::{Deserialize, Serialize};

use leaderboard::UserRecord;

mod storage;

pub use storage::*;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTheme(Theme),
    ToggleTheme,
    AddToHistory(String),
    AddToFavorites(String),
    RemoveFromFavorites(String),
    SetCurrentUser(Option<String>),
    SetLeaderboard(Vec<UserRecord>),
    LoadState(PersistedState),
}

/// The part of [`DashboardState`] that survives between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub theme: Theme,
    pub search_history: Vec<String>,
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub theme: Theme,
    pub search_history: Vec<String>,
    pub favorites: Vec<String>,
    pub current_user: Option<String>,
    pub leaderboard: Vec<UserRecord>,
}

impl DashboardState {
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SetTheme(theme) => Self { theme, ..self },
            Action::ToggleTheme => Self {
                theme: self.theme.toggled(),
                ..self
            },
            Action::AddToHistory(username) => {
                let search_history = std::iter::once(username.clone())
                    .chain(self.search_history.into_iter().filter(|u| *u != username))
                    .take(HISTORY_LIMIT)
                    .collect();

                Self {
                    search_history,
                    ..self
                }
            }
            Action::AddToFavorites(username) => {
                if self.favorites.contains(&username) {
                    self
                } else {
                    let mut favorites = self.favorites;
                    favorites.push(username);
                    Self { favorites, ..self }
                }
            }
            Action::RemoveFromFavorites(username) => Self {
                favorites: self
                    .favorites
                    .into_iter()
                    .filter(|u| *u != username)
                    .collect(),
                ..self
            },
            Action::SetCurrentUser(current_user) => Self {
                current_user,
                ..self
            },
            Action::SetLeaderboard(leaderboard) => Self {
                leaderboard,
                ..self
            },
            Action::LoadState(persisted) => Self {
                theme: persisted.theme,
                search_history: persisted.search_history,
                favorites: persisted.favorites,
                ..self
            },
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            theme: self.theme,
            search_history: self.search_history.clone(),
            favorites: self.favorites.clone(),
        }
    }

    pub fn is_favorite(&self, username: &str) -> bool {
        self.favorites.iter().any(|u| u == username)
    }
}
