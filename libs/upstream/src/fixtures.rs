use serde_json::{json, Value as JsonValue};

pub const EASY_QUESTIONS: u64 = 830;
pub const MEDIUM_QUESTIONS: u64 = 1740;
pub const HARD_QUESTIONS: u64 = 760;

pub fn all_questions_count() -> JsonValue {
    json!([
        { "difficulty": "All", "count": EASY_QUESTIONS + MEDIUM_QUESTIONS + HARD_QUESTIONS },
        { "difficulty": "Easy", "count": EASY_QUESTIONS },
        { "difficulty": "Medium", "count": MEDIUM_QUESTIONS },
        { "difficulty": "Hard", "count": HARD_QUESTIONS }
    ])
}

pub fn avatar_url(username: &str) -> String {
    format!("https://assets.leetcode.com/users/{}/avatar.png", username)
}

fn tag(name: &str, slug: &str, solved: u64) -> JsonValue {
    json!({ "tagName": name, "tagSlug": slug, "problemsSolved": solved })
}

/// A realistic profile payload. Submissions are twice the solved counts.
pub fn profile_payload(
    username: &str,
    ranking: Option<u64>,
    easy: u64,
    medium: u64,
    hard: u64,
) -> JsonValue {
    let all = easy + medium + hard;
    let bucket = |difficulty: &str, count: u64, submissions: u64| {
        json!({ "difficulty": difficulty, "count": count, "submissions": submissions })
    };

    json!({
        "data": {
            "matchedUser": {
                "username": username,
                "profile": {
                    "userAvatar": avatar_url(username),
                    "ranking": ranking,
                    "realName": ""
                },
                "languageProblemCount": [
                    { "languageName": "Python3", "problemsSolved": all },
                    { "languageName": "Rust", "problemsSolved": all / 2 },
                    { "languageName": "C++", "problemsSolved": all / 4 }
                ],
                "tagProblemCounts": {
                    "advanced": [
                        tag("Dynamic Programming", "dynamic-programming", medium),
                        tag("Backtracking", "backtracking", hard)
                    ]
                },
                "submitStats": {
                    "acSubmissionNum": [
                        bucket("All", all, all * 2),
                        bucket("Easy", easy, easy * 2),
                        bucket("Medium", medium, medium * 2),
                        bucket("Hard", hard, hard * 2)
                    ],
                    "totalSubmissionNum": [
                        bucket("All", all * 2, all * 4),
                        bucket("Easy", easy * 2, easy * 4),
                        bucket("Medium", medium * 2, medium * 4),
                        bucket("Hard", hard * 2, hard * 4)
                    ]
                }
            },
            "allQuestionsCount": all_questions_count()
        }
    })
}

/// What the upstream answers for a username it doesn't know.
pub fn unmatched_payload() -> JsonValue {
    json!({
        "errors": [
            {
                "message": "That user does not exist.",
                "locations": [{ "line": 3, "column": 3 }],
                "path": ["matchedUser"],
                "extensions": { "handled": true }
            }
        ],
        "data": {
            "matchedUser": null,
            "allQuestionsCount": all_questions_count()
        }
    })
}
