//! High score module - records produced from finished games
//!
//! The engine only builds and orders records. Storing them, and exchanging
//! them with a remote service, belongs to the embedding application; the
//! serde representation uses camelCase keys for that purpose.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Game, StartId};

/// Longest accepted set of initials
pub const MAX_INITIALS: usize = 3;

/// Initials used for placeholder entries
pub const ANONYMOUS_INITIALS: &str = "---";

/// Which front end a score was set on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Mobile,
    Desktop,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Mobile => "MOBILE",
            Platform::Desktop => "DESKTOP",
        }
    }
}

/// One high-score table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScore {
    pub score: u32,
    pub initials: String,
    /// Wall-clock start of the game in milliseconds, supplied by the caller
    pub game_start_time: u64,
    pub lines_cleared: u32,
    /// Front end the game was played on; placeholders carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_id: Option<StartId>,
}

impl HighScore {
    /// Record a finished game.
    ///
    /// Fails when the game is still running or the initials are not 1 to 3
    /// characters after trimming.
    pub fn from_game(
        game: &Game,
        initials: &str,
        game_start_time: u64,
        platform: Platform,
    ) -> Result<Self, HighScoreError> {
        if !game.over() {
            return Err(HighScoreError::GameNotOver);
        }
        let initials = validate_initials(initials)?;
        Ok(Self {
            score: game.score(),
            initials,
            game_start_time,
            lines_cleared: game.lines_cleared(),
            platform: Some(platform),
            start_id: Some(game.start_id()),
        })
    }

    /// A placeholder entry for an empty table
    pub fn placeholder(score: u32, lines_cleared: u32) -> Self {
        Self {
            score,
            initials: ANONYMOUS_INITIALS.to_string(),
            game_start_time: 0,
            lines_cleared,
            platform: None,
            start_id: None,
        }
    }
}

/// Trim and check initials, returning them upper-cased
pub fn validate_initials(initials: &str) -> Result<String, HighScoreError> {
    let trimmed = initials.trim();
    let count = trimmed.chars().count();
    if count == 0 || count > MAX_INITIALS {
        return Err(HighScoreError::InvalidInitials);
    }
    Ok(trimmed.to_uppercase())
}

/// Highest score first; equal scores keep the earlier game first
pub fn sort_high_scores(scores: &[HighScore]) -> Vec<HighScore> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.game_start_time.cmp(&b.game_start_time))
    });
    sorted
}

/// Whether `score` would enter a table of `capacity` entries
pub fn qualifies(scores: &[HighScore], score: u32, capacity: usize) -> bool {
    if scores.len() < capacity {
        return true;
    }
    scores.iter().any(|entry| score > entry.score)
}

/// Ten descending placeholder entries
pub fn default_high_scores() -> Vec<HighScore> {
    (1..=10u32)
        .rev()
        .map(|n| HighScore::placeholder(n * 200, n * 2))
        .collect()
}

/// Why a high score could not be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighScoreError {
    GameNotOver,
    InvalidInitials,
}

impl HighScoreError {
    pub fn code(self) -> &'static str {
        match self {
            HighScoreError::GameNotOver => "game_not_over",
            HighScoreError::InvalidInitials => "invalid_initials",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            HighScoreError::GameNotOver => "game is still in progress",
            HighScoreError::InvalidInitials => "initials must be 1 to 3 characters",
        }
    }
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for HighScoreError {}
