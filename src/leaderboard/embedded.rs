//! Leaderboard rows kept in the local redb file.
//!
//! Every function here blocks; callers run them under `spawn_blocking`.

use redb::{Database, ReadableTable};

use crate::db::tables;
use crate::error::Result;
use crate::models::{rank_top, NewScore, ScoreEntry, ScoreRecord};

/// Best scores for one game, highest first
pub fn top_scores(db: &Database, game: &str) -> Result<Vec<ScoreEntry>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::SCORES)?;

    let mut entries = Vec::new();
    for item in table.range((game, "")..)? {
        let (key, value) = item?;
        let (row_game, username) = key.value();
        if row_game != game {
            break;
        }
        entries.push(ScoreEntry {
            username: username.to_string(),
            score: value.value(),
        });
    }

    Ok(rank_top(entries))
}

/// Current score of one user for one game
pub fn user_score(db: &Database, game: &str, username: &str) -> Result<Option<u32>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::SCORES)?;
    let score = table.get((game, username))?.map(|v| v.value());
    Ok(score)
}

/// Replace the user's score for the game in one write transaction
pub fn upsert(db: &Database, score: &NewScore) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(tables::SCORES)?;
        table.insert((score.game.as_str(), score.username.as_str()), score.score)?;
    }
    write_txn.commit()?;
    Ok(())
}

/// Every stored row, ordered by game then score descending
pub fn all_scores(db: &Database) -> Result<Vec<ScoreRecord>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::SCORES)?;

    let mut records = Vec::new();
    for item in table.iter()? {
        let (key, value) = item?;
        let (game, username) = key.value();
        records.push(ScoreRecord {
            username: username.to_string(),
            game: game.to_string(),
            score: value.value(),
        });
    }

    // Keys are already grouped by game; the stable sort keeps username order on ties
    records.sort_by(|a, b| a.game.cmp(&b.game).then(b.score.cmp(&a.score)));
    Ok(records)
}

/// Move every score from `from` to `to`
///
/// When `to` already holds a score for a game, the higher score is kept.
/// Returns the number of rows moved.
pub fn rename_user(db: &Database, from: &str, to: &str) -> Result<u64> {
    let write_txn = db.begin_write()?;
    let moved = {
        let mut table = write_txn.open_table(tables::SCORES)?;

        let mut rows: Vec<(String, u32)> = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            let (game, username) = key.value();
            if username == from {
                rows.push((game.to_string(), value.value()));
            }
        }

        for (game, score) in &rows {
            table.remove((game.as_str(), from))?;
            let existing = table.get((game.as_str(), to))?.map(|v| v.value());
            let best = existing.map_or(*score, |current| current.max(*score));
            table.insert((game.as_str(), to), best)?;
        }

        rows.len() as u64
    };
    write_txn.commit()?;
    Ok(moved)
}
