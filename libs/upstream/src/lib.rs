use futures::future::BoxFuture;
use serde_json::Value as JsonValue;
use thiserror::Error;

mod client;
mod model;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use client::*;
pub use model::*;

pub const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile {
      userAvatar
      ranking
      realName
    }
    languageProblemCount {
      languageName
      problemsSolved
    }
    tagProblemCounts {
      advanced {
        tagName
        tagSlug
        problemsSolved
      }
    }
    submitStats {
      acSubmissionNum {
        difficulty
        count
        submissions
      }
      totalSubmissionNum {
        difficulty
        count
        submissions
      }
    }
  }
  allQuestionsCount {
    difficulty
    count
  }
}"#;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("LeetCode API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LeetCode API error: {0}")]
    Status(u16),
    #[error("Malformed LeetCode response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A profile payload as the upstream returned it, alongside a typed view.
#[derive(Debug, Clone)]
pub struct Fetched {
    raw: JsonValue,
    parsed: ProfileResponse,
}

impl Fetched {
    pub fn from_value(raw: JsonValue) -> Result<Self, UpstreamError> {
        let parsed = serde_json::from_value(raw.clone())?;

        Ok(Self { raw, parsed })
    }

    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    pub fn into_raw(self) -> JsonValue {
        self.raw
    }

    pub fn data(&self) -> Option<&ProfileData> {
        self.parsed.data.as_ref()
    }

    pub fn matched_user(&self) -> Option<&MatchedUser> {
        self.data().and_then(|d| d.matched_user.as_ref())
    }

    /// The raw `data` object, which is what comparisons hand back.
    pub fn raw_data(&self) -> JsonValue {
        self.raw.get("data").cloned().unwrap_or(JsonValue::Null)
    }

    pub fn raw_all_questions_count(&self) -> JsonValue {
        self.raw
            .get("data")
            .and_then(|d| d.get("allQuestionsCount"))
            .cloned()
            .unwrap_or(JsonValue::Null)
    }
}

pub trait Upstream: Send + Sync {
    fn fetch_profile<'a>(
        &'a self,
        username: &'a str,
    ) -> BoxFuture<'a, Result<Fetched, UpstreamError>>;
}
