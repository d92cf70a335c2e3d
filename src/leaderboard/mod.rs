//! High-score leaderboards.
//!
//! Reads never fail: an unreachable or unconfigured store yields placeholder
//! rows (top lists) or 0 (single-user lookups). Writes always report failure.

pub mod embedded;
pub mod remote;

pub use remote::SupabaseClient;

use crate::config::{Config, LeaderboardBackend};
use crate::constants::ERR_INVALID_USERNAME;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{NewScore, ScoreEntry, ScoreRecord, Username};

/// Where score rows are stored
#[derive(Clone)]
pub enum ScoreBackend {
    /// No store available
    Unconfigured,
    /// Hosted PostgREST table
    Remote(SupabaseClient),
    /// Table in the local redb file
    Embedded(Db),
}

impl ScoreBackend {
    /// Pick the backend named by the configuration
    ///
    /// A remote backend without URL or key is reported and left unconfigured.
    pub fn from_config(config: &Config, db: &Db) -> anyhow::Result<Self> {
        let backend = match config.leaderboard_backend {
            LeaderboardBackend::Remote => {
                match (&config.supabase_url, &config.supabase_key) {
                    (Some(url), Some(key)) => Self::Remote(SupabaseClient::new(
                        url,
                        key,
                        &config.leaderboard_table,
                    )?),
                    _ => {
                        tracing::warn!(
                            "SUPABASE_URL or SUPABASE_ANON_KEY not set, leaderboard is unconfigured"
                        );
                        Self::Unconfigured
                    }
                }
            }
            LeaderboardBackend::Embedded => Self::Embedded(db.clone()),
            LeaderboardBackend::None => Self::Unconfigured,
        };

        tracing::info!("Leaderboard backend: {}", backend.kind());
        Ok(backend)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Remote(_) => "remote",
            Self::Embedded(_) => "embedded",
        }
    }
}

/// Leaderboard operations over whichever backend was configured
#[derive(Clone)]
pub struct LeaderboardService {
    backend: ScoreBackend,
}

impl LeaderboardService {
    pub fn new(backend: ScoreBackend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &ScoreBackend {
        &self.backend
    }

    /// Up to five best scores for a game, or five placeholders on failure
    pub async fn get_top_scores(&self, game: &str) -> Vec<ScoreEntry> {
        match self.fetch_top_scores(game).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Using placeholder leaderboard for {}: {}", game, e);
                ScoreEntry::placeholders()
            }
        }
    }

    async fn fetch_top_scores(&self, game: &str) -> Result<Vec<ScoreEntry>> {
        match &self.backend {
            ScoreBackend::Unconfigured => Err(AppError::BackendUnavailable),
            ScoreBackend::Remote(client) => client.top_scores(game).await,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                let game = game.to_string();
                tokio::task::spawn_blocking(move || embedded::top_scores(&db, &game)).await?
            }
        }
    }

    /// The user's current score for a game, 0 when absent or unreadable
    pub async fn get_user_score(&self, game: &str, username: &str) -> u32 {
        match self.fetch_user_score(game, username).await {
            Ok(score) => score.unwrap_or(0),
            Err(AppError::BackendUnavailable) => 0,
            Err(e) => {
                tracing::warn!("Failed to read score of {} for {}: {}", username, game, e);
                0
            }
        }
    }

    async fn fetch_user_score(&self, game: &str, username: &str) -> Result<Option<u32>> {
        match &self.backend {
            ScoreBackend::Unconfigured => Err(AppError::BackendUnavailable),
            ScoreBackend::Remote(client) => client.user_score(game, username).await,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                let game = game.to_string();
                let username = username.to_string();
                tokio::task::spawn_blocking(move || embedded::user_score(&db, &game, &username))
                    .await?
            }
        }
    }

    /// Validate and store a score, replacing the user's previous one for the game
    pub async fn submit_score(&self, game: &str, username: &str, score: i64) -> Result<NewScore> {
        let new_score = match NewScore::new(game, username, score) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(
                    "Rejected score submission ({}, {:?}, {}): {}",
                    game,
                    username,
                    score,
                    e
                );
                return Err(e);
            }
        };

        match &self.backend {
            ScoreBackend::Unconfigured => return Err(AppError::BackendUnavailable),
            ScoreBackend::Remote(client) => client.upsert(&new_score).await?,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                let record = new_score.clone();
                tokio::task::spawn_blocking(move || embedded::upsert(&db, &record)).await??
            }
        }

        tracing::info!(
            "Score stored: {} scored {} in {}",
            new_score.username,
            new_score.score,
            new_score.game
        );

        Ok(new_score)
    }

    /// Every stored score row
    pub async fn all_scores(&self) -> Result<Vec<ScoreRecord>> {
        match &self.backend {
            ScoreBackend::Unconfigured => Err(AppError::BackendUnavailable),
            ScoreBackend::Remote(client) => client.all_scores().await,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                tokio::task::spawn_blocking(move || embedded::all_scores(&db)).await?
            }
        }
    }

    /// Move every score of one username to another
    pub async fn rename_user(&self, from: &str, to: &str) -> Result<u64> {
        let from = from.trim();
        if from.is_empty() {
            return Err(AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()));
        }
        let to = Username::normalize(to)
            .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()))?;

        let moved = match &self.backend {
            ScoreBackend::Unconfigured => return Err(AppError::BackendUnavailable),
            ScoreBackend::Remote(client) => client.rename_user(from, to).await?,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                let (from_owned, to_owned) = (from.to_string(), to.to_string());
                tokio::task::spawn_blocking(move || {
                    embedded::rename_user(&db, &from_owned, &to_owned)
                })
                .await??
            }
        };

        tracing::info!("Renamed {} score rows from {} to {}", moved, from, to);
        Ok(moved)
    }

    /// Whether the backend currently answers reads
    pub async fn is_available(&self) -> bool {
        match &self.backend {
            ScoreBackend::Unconfigured => false,
            ScoreBackend::Remote(client) => client.ping().await,
            ScoreBackend::Embedded(db) => {
                let db = db.clone();
                tokio::task::spawn_blocking(move || db.begin_read().is_ok())
                    .await
                    .unwrap_or(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PLACEHOLDER_USERNAME, TOP_SCORES_LIMIT};
    use crate::db::open_database;
    use tempfile::TempDir;

    fn embedded_service(temp_dir: &TempDir) -> LeaderboardService {
        let db = open_database(temp_dir.path().join("portal.db")).unwrap();
        LeaderboardService::new(ScoreBackend::Embedded(db))
    }

    #[tokio::test]
    async fn test_unconfigured_reads_degrade() {
        let service = LeaderboardService::new(ScoreBackend::Unconfigured);

        let top = service.get_top_scores("snake").await;
        assert_eq!(top.len(), TOP_SCORES_LIMIT);
        assert!(top
            .iter()
            .all(|e| e.username == PLACEHOLDER_USERNAME && e.score == 0));

        assert_eq!(service.get_user_score("snake", "Ana").await, 0);
        assert!(!service.is_available().await);
    }

    #[tokio::test]
    async fn test_unconfigured_writes_fail() {
        let service = LeaderboardService::new(ScoreBackend::Unconfigured);

        assert!(matches!(
            service.submit_score("snake", "Ana", 10).await,
            Err(AppError::BackendUnavailable)
        ));
        assert!(matches!(
            service.all_scores().await,
            Err(AppError::BackendUnavailable)
        ));
        assert!(matches!(
            service.rename_user("a", "b").await,
            Err(AppError::BackendUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_validation_precedes_backend() {
        // Invalid input is reported as such even without a backend
        let service = LeaderboardService::new(ScoreBackend::Unconfigured);
        assert!(matches!(
            service.submit_score("snake", "Ana", -1).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_then_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let service = embedded_service(&temp_dir);

        let longest = "c".repeat(20);
        for (name, score) in [("Ana", 0), ("Bia", 10_000), (longest.as_str(), 42)] {
            service.submit_score("pinball", name, score).await.unwrap();
            assert_eq!(service.get_user_score("pinball", name).await, score as u32);
        }

        assert_eq!(service.get_user_score("pinball", "nobody").await, 0);
        assert!(service.is_available().await);
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_state() {
        let temp_dir = TempDir::new().unwrap();
        let service = embedded_service(&temp_dir);

        service.submit_score("snake", "Ana", 50).await.unwrap();

        assert!(service.submit_score("snake", "Ana", 10_001).await.is_err());
        assert!(service.submit_score("snake", "Ana", -1).await.is_err());
        assert!(service.submit_score("snake", "", 70).await.is_err());

        assert_eq!(service.get_user_score("snake", "Ana").await, 50);
        assert_eq!(service.all_scores().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resubmission_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let service = embedded_service(&temp_dir);

        service.submit_score("snake", "Ana", 50).await.unwrap();
        service.submit_score("snake", "Ana", 80).await.unwrap();

        assert_eq!(service.get_user_score("snake", "Ana").await, 80);
        let top = service.get_top_scores("snake").await;
        assert_eq!(top.iter().filter(|e| e.username == "Ana").count(), 1);
        assert_eq!(top[0].score, 80);
    }

    #[tokio::test]
    async fn test_rename_validates_target() {
        let temp_dir = TempDir::new().unwrap();
        let service = embedded_service(&temp_dir);

        assert!(matches!(
            service.rename_user("teste", "").await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            service.rename_user(" ", "RhuanMCF").await,
            Err(AppError::InvalidInput(_))
        ));

        service.submit_score("snake", "teste", 10).await.unwrap();
        assert_eq!(service.rename_user("teste", "RhuanMCF").await.unwrap(), 1);
        assert_eq!(service.get_user_score("snake", "RhuanMCF").await, 10);
    }
}
