use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    All,
}

impl Difficulty {
    pub const SOLVABLE: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::All => "All",
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default)]
    pub data: Option<ProfileData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(default)]
    pub matched_user: Option<MatchedUser>,
    #[serde(default, deserialize_with = "nullable")]
    pub all_questions_count: Vec<QuestionCount>,
}

impl ProfileData {
    pub fn questions(&self, difficulty: Difficulty) -> u64 {
        self.all_questions_count
            .iter()
            .find(|q| difficulty.matches(&q.difficulty))
            .map(|q| q.count)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub username: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default, deserialize_with = "nullable")]
    pub language_problem_count: Vec<LanguageCount>,
    #[serde(default)]
    pub tag_problem_counts: Option<TagProblemCounts>,
    #[serde(default)]
    pub submit_stats: Option<SubmitStats>,
}

impl MatchedUser {
    /// Accepted count for the "All" bucket, zero when absent.
    pub fn total_solved(&self) -> u64 {
        self.accepted(Difficulty::All).count
    }

    pub fn accepted(&self, difficulty: Difficulty) -> DifficultyCount {
        self.submit_stats
            .as_ref()
            .map(|s| DifficultyCount::find(&s.ac_submission_num, difficulty))
            .unwrap_or_default()
    }

    pub fn attempted(&self, difficulty: Difficulty) -> DifficultyCount {
        self.submit_stats
            .as_ref()
            .map(|s| DifficultyCount::find(&s.total_submission_num, difficulty))
            .unwrap_or_default()
    }

    pub fn ranking(&self) -> Option<u64> {
        self.profile.as_ref().and_then(|p| p.ranking)
    }

    pub fn avatar(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.user_avatar.as_deref())
    }

    pub fn real_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.real_name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn advanced_skills(&self) -> &[TagCount] {
        self.tag_problem_counts
            .as_ref()
            .map(|t| t.advanced.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub ranking: Option<u64>,
    #[serde(default)]
    pub real_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    pub language_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProblemCounts {
    #[serde(default, deserialize_with = "nullable")]
    pub advanced: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag_name: String,
    #[serde(default)]
    pub tag_slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default, deserialize_with = "nullable")]
    pub ac_submission_num: Vec<DifficultyCount>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCount {
    pub difficulty: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub submissions: u64,
}

impl DifficultyCount {
    /// Case-insensitive lookup, missing buckets count as zero.
    pub fn find(counts: &[DifficultyCount], difficulty: Difficulty) -> DifficultyCount {
        counts
            .iter()
            .find(|c| difficulty.matches(&c.difficulty))
            .cloned()
            .unwrap_or_else(|| DifficultyCount {
                difficulty: difficulty.to_string(),
                count: 0,
                submissions: 0,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCount {
    pub difficulty: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

/// Upstream sends `null` for lists and counts it has nothing for.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
