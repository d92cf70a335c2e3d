use anyhow::Context;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::constants::{REMOTE_TIMEOUT_SECS, TOP_SCORES_LIMIT};
use crate::error::{AppError, Result};
use crate::models::{rank_top, NewScore, ScoreEntry, ScoreRecord};

/// Client for a leaderboard table exposed through PostgREST (Supabase)
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    score: u32,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Turn a non-2xx response into [`AppError::RemoteStatus`]
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::RemoteStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Best scores for one game, highest first
    pub async fn top_scores(&self, game: &str) -> Result<Vec<ScoreEntry>> {
        let game_filter = format!("eq.{game}");
        let limit = TOP_SCORES_LIMIT.to_string();

        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "username,score"),
                ("game", game_filter.as_str()),
                ("order", "score.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let rows: Vec<ScoreEntry> = Self::check(response).await?.json().await?;

        // The server already orders and limits; re-rank in case it ignored either
        Ok(rank_top(rows))
    }

    /// Current score of one user for one game
    pub async fn user_score(&self, game: &str, username: &str) -> Result<Option<u32>> {
        let game_filter = format!("eq.{game}");
        let user_filter = format!("eq.{username}");

        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "score"),
                ("game", game_filter.as_str()),
                ("username", user_filter.as_str()),
                ("order", "score.desc"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let rows: Vec<ScoreRow> = Self::check(response).await?.json().await?;
        Ok(rows.first().map(|row| row.score))
    }

    /// Insert or replace the row keyed by `(username, game)` in one request
    pub async fn upsert(&self, score: &NewScore) -> Result<()> {
        let body = json!([{
            "username": score.username,
            "game": score.game,
            "score": score.score,
        }]);

        let response = self
            .request(Method::POST)
            .query(&[("on_conflict", "username,game")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Every stored row, ordered by game then score descending
    pub async fn all_scores(&self) -> Result<Vec<ScoreRecord>> {
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "username,game,score"),
                ("order", "game.asc,score.desc"),
            ])
            .send()
            .await?;

        let rows: Vec<ScoreRecord> = Self::check(response).await?.json().await?;
        Ok(rows)
    }

    /// Point every row of `from` at `to`, returning the number of rows changed
    pub async fn rename_user(&self, from: &str, to: &str) -> Result<u64> {
        let user_filter = format!("eq.{from}");

        let response = self
            .request(Method::PATCH)
            .query(&[("username", user_filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&json!({ "username": to }))
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = Self::check(response).await?.json().await?;
        Ok(rows.len() as u64)
    }

    /// Whether the table answers at all
    pub async fn ping(&self) -> bool {
        let result = self
            .request(Method::GET)
            .query(&[("select", "score"), ("limit", "1")])
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Remote leaderboard ping failed: {}", e);
                false
            }
        }
    }
}
