use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_INVALID_SCORE, ERR_INVALID_USERNAME, ERR_UNKNOWN_GAME, GAMES, MAX_SCORE,
    PLACEHOLDER_USERNAME, TOP_SCORES_LIMIT,
};
use crate::error::{AppError, Result};
use crate::models::Username;

/// One row of a leaderboard as returned to the games
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

impl ScoreEntry {
    /// The rows shown when no leaderboard data is available
    pub fn placeholders() -> Vec<ScoreEntry> {
        (0..TOP_SCORES_LIMIT)
            .map(|_| ScoreEntry {
                username: PLACEHOLDER_USERNAME.to_string(),
                score: 0,
            })
            .collect()
    }
}

/// A stored score with its game, used by maintenance views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub username: String,
    pub game: String,
    pub score: u32,
}

/// A validated score submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub game: String,
    pub username: String,
    pub score: u32,
}

impl NewScore {
    /// Validate a submission before it reaches any store
    pub fn new(game: &str, username: &str, score: i64) -> Result<Self> {
        let game = Game::parse(game)?;

        let username = Username::normalize(username)
            .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()))?;

        if !(0..=MAX_SCORE).contains(&score) {
            return Err(AppError::InvalidInput(ERR_INVALID_SCORE.to_string()));
        }

        Ok(Self {
            game: game.to_string(),
            username: username.to_string(),
            score: score as u32,
        })
    }
}

/// Game name rules
pub struct Game;

impl Game {
    /// Accept only the games hosted by the portal
    pub fn parse(raw: &str) -> Result<&'static str> {
        let name = raw.trim().to_ascii_lowercase();
        GAMES
            .iter()
            .copied()
            .find(|g| *g == name)
            .ok_or_else(|| AppError::InvalidInput(ERR_UNKNOWN_GAME.to_string()))
    }

    pub fn is_known(raw: &str) -> bool {
        GAMES.contains(&raw)
    }
}

/// Sort rows by score descending and keep the top entries
///
/// The sort is stable, so ties keep storage order.
pub fn rank_top(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(TOP_SCORES_LIMIT);
    entries
}
