use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_GAME, ERR_INVALID_BODY};
use crate::error::{AppError, Result};
use crate::models::{Game, ScoreEntry};
use crate::routes::validation::parse_score;
use crate::session::Session;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoresQuery {
    pub game: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoresResponse {
    pub scores: Vec<ScoreEntry>,
    #[serde(rename = "userScore")]
    pub user_score: u32,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub score: Value,
    pub game: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitScoreResponse {
    pub success: bool,
}

/// Leaderboard for one game plus the caller's own score
///
/// GET /api/recordes?game=<name>
///
/// Always answers with five rows when the store is unavailable; `userScore`
/// is 0 for anonymous visitors.
pub async fn get_scores(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ScoresQuery>,
) -> Result<Json<ScoresResponse>> {
    let game = Game::parse(params.game.as_deref().unwrap_or(DEFAULT_GAME))?;
    let session = Session::from_headers(&headers, &state.config.secret_key);

    let scores = state.leaderboard.get_top_scores(game).await;
    let user_score = match session.identity() {
        Some(username) => state.leaderboard.get_user_score(game, username).await,
        None => 0,
    };

    Ok(Json(ScoresResponse { scores, user_score }))
}

/// Store a score, replacing the user's previous one for that game
///
/// POST /api/recordes  `{username, score, game}`
pub async fn submit_score(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Result<Json<SubmitScoreResponse>> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Malformed score submission: {}", e);
        AppError::InvalidInput(ERR_INVALID_BODY.to_string())
    })?;

    let score = parse_score(&payload.score)?;
    let game = payload.game.as_deref().unwrap_or(DEFAULT_GAME);

    state
        .leaderboard
        .submit_score(game, &payload.username, score)
        .await?;

    Ok(Json(SubmitScoreResponse { success: true }))
}
