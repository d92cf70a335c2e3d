use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the local database and the leaderboard backend separately. An
/// unavailable leaderboard does not make the service unhealthy because reads
/// fall back to placeholder data.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let db_status = tokio::task::spawn_blocking(move || match db.begin_read() {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected"
        }
    })
    .await
    .unwrap_or("error");

    let leaderboard_available = state.leaderboard.is_available().await;

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "leaderboard": {
            "backend": state.leaderboard.backend().kind(),
            "available": leaderboard_available,
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
