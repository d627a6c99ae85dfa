use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const MAXIMUM_USERNAME_LENGTH: usize = 15;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,
    #[error("Username can only contain letters, numbers, hyphens, and underscores (max 15 chars)")]
    Invalid,
    #[error("Please enter different usernames")]
    Identical,
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"^[a-zA-Z0-9_-]{{1,{}}}$", MAXIMUM_USERNAME_LENGTH))
            .expect("valid username pattern")
    })
}

/// Returns the trimmed username when it's acceptable.
pub fn validate_username(username: &str) -> Result<&str, UsernameError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(UsernameError::Empty);
    }

    if !username_pattern().is_match(trimmed) {
        return Err(UsernameError::Invalid);
    }

    Ok(trimmed)
}

pub fn validate_pair<'a>(
    first: &'a str,
    second: &'a str,
) -> Result<(&'a str, &'a str), UsernameError> {
    let first = validate_username(first)?;
    let second = validate_username(second)?;

    if first.eq_ignore_ascii_case(second) {
        return Err(UsernameError::Identical);
    }

    Ok((first, second))
}
