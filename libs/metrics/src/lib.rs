use itertools::Itertools;
use serde::Serialize;

use upstream::{Difficulty, MatchedUser, ProfileData, TagCount};

mod compare;
mod usernames;

pub use compare::*;
pub use usernames::*;

pub const TOP_LANGUAGES: usize = 8;
pub const TOP_SKILLS: usize = 15;

/// `round(100 * solved / total)`, zero when there's nothing to divide by.
pub fn percentage(solved: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }

    (100.0 * solved as f64 / total as f64).round() as u64
}

pub fn acceptance_rate(user: &MatchedUser) -> u64 {
    difficulty_acceptance(user, Difficulty::All)
}

pub fn difficulty_acceptance(user: &MatchedUser, difficulty: Difficulty) -> u64 {
    percentage(
        user.accepted(difficulty).count,
        user.attempted(difficulty).submissions,
    )
}

pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProgress {
    pub difficulty: String,
    pub solved: u64,
    pub total: u64,
    pub percentage: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageShare {
    pub language: String,
    pub solved: u64,
    /// Relative to the user's most used language.
    pub share: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub username: String,
    pub real_name: Option<String>,
    pub ranking: Option<u64>,
    pub avatar: Option<String>,
    pub total_solved: u64,
    pub total_submissions: u64,
    pub acceptance_rate: u64,
    pub progress: Vec<DifficultyProgress>,
    pub languages: Vec<LanguageShare>,
    pub skills: Vec<TagCount>,
}

impl ProfileSummary {
    pub fn from_data(data: &ProfileData) -> Option<Self> {
        let user = data.matched_user.as_ref()?;

        let progress = Difficulty::SOLVABLE
            .iter()
            .map(|difficulty| {
                let solved = user.accepted(*difficulty).count;
                let total = data.questions(*difficulty);
                DifficultyProgress {
                    difficulty: difficulty.to_string(),
                    solved,
                    total,
                    percentage: percentage(solved, total),
                }
            })
            .collect();

        Some(Self {
            username: user.username.clone(),
            real_name: user.real_name().map(str::to_owned),
            ranking: user.ranking(),
            avatar: user.avatar().map(str::to_owned),
            total_solved: user.total_solved(),
            total_submissions: user.attempted(Difficulty::All).submissions,
            acceptance_rate: acceptance_rate(user),
            progress,
            languages: language_shares(user),
            skills: user.advanced_skills().iter().take(TOP_SKILLS).cloned().collect(),
        })
    }

    pub fn solved(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::All => self.total_solved,
            _ => self
                .progress
                .iter()
                .find(|p| difficulty.matches(&p.difficulty))
                .map(|p| p.solved)
                .unwrap_or_default(),
        }
    }

    pub fn score(&self) -> f64 {
        composite_score(self.total_solved, self.ranking)
    }
}

pub fn language_shares(user: &MatchedUser) -> Vec<LanguageShare> {
    let most = user
        .language_problem_count
        .iter()
        .map(|l| l.problems_solved)
        .max()
        .unwrap_or_default();

    user.language_problem_count
        .iter()
        .sorted_by(|a, b| b.problems_solved.cmp(&a.problems_solved))
        .take(TOP_LANGUAGES)
        .map(|l| LanguageShare {
            language: l.language_name.clone(),
            solved: l.problems_solved,
            share: percentage(l.problems_solved, most),
        })
        .collect()
}
