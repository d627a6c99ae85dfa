use serde::Serialize;

use upstream::Difficulty;

use crate::ProfileSummary;

/// Solved count plus a bonus for a better global rank. The coefficients are
/// kept exactly as the dashboard has always shown them, a rank of zero counts
/// as unranked.
pub fn composite_score(total_solved: u64, ranking: Option<u64>) -> f64 {
    let bonus = match ranking {
        Some(ranking) if ranking > 0 => (100_000.0 - ranking as f64) / 1_000.0,
        _ => 0.0,
    };

    total_solved as f64 + bonus
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    First,
    Second,
    Tie,
}

impl Verdict {
    pub fn between(first: f64, second: f64) -> Self {
        if first > second {
            Verdict::First
        } else if second > first {
            Verdict::Second
        } else {
            Verdict::Tie
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub first: ProfileSummary,
    pub second: ProfileSummary,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn new(first: ProfileSummary, second: ProfileSummary) -> Self {
        let verdict = Verdict::between(first.score(), second.score());

        Self {
            first,
            second,
            verdict,
        }
    }

    pub fn winner(&self) -> Option<&ProfileSummary> {
        match self.verdict {
            Verdict::First => Some(&self.first),
            Verdict::Second => Some(&self.second),
            Verdict::Tie => None,
        }
    }

    pub fn summary(&self) -> String {
        match self.winner() {
            Some(winner) => format!("{} has the edge with more problems solved!", winner.username),
            None => "It's a close match! Both users are performing excellently!".to_owned(),
        }
    }

    /// Which side leads on a single figure, `None` when level.
    pub fn leader_by<F, T>(&self, figure: F) -> Option<Verdict>
    where
        F: Fn(&ProfileSummary) -> T,
        T: PartialOrd,
    {
        let (a, b) = (figure(&self.first), figure(&self.second));
        if a > b {
            Some(Verdict::First)
        } else if b > a {
            Some(Verdict::Second)
        } else {
            None
        }
    }

    pub fn solved_leader(&self, difficulty: Difficulty) -> Option<Verdict> {
        self.leader_by(|s| s.solved(difficulty))
    }

    /// Lower is better, unranked users never lead.
    pub fn ranking_leader(&self) -> Option<Verdict> {
        self.leader_by(|s| std::cmp::Reverse(s.ranking.filter(|r| *r > 0).unwrap_or(u64::MAX)))
    }
}
