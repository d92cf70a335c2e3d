use axum::{
    body::Body,
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, Request},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use std::io::ErrorKind;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::{AppError, Result};
use crate::models::Game;
use crate::render::{index_page, inject_current_user};
use crate::session::{clear_flash_cookie, Session};
use crate::AppState;

/// Render a page, dropping the flash cookie once its message was shown
pub fn html_page(html: String, session: &Session) -> Response {
    if session.flash().is_some() {
        (AppendHeaders([(SET_COOKIE, clear_flash_cookie())]), Html(html)).into_response()
    } else {
        Html(html).into_response()
    }
}

/// GET /
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::from_headers(&headers, &state.config.secret_key);
    html_page(index_page(session.identity(), session.flash()), &session)
}

/// GET /<game>
pub async fn game_redirect(Path(game): Path<String>) -> Result<Redirect> {
    if !Game::is_known(&game) {
        return Err(AppError::NotFound);
    }
    Ok(Redirect::permanent(&format!("/{game}/")))
}

/// GET /<game>/
///
/// Serves the game's `index.html` with the logged-in user exposed to its scripts.
pub async fn game_index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(game): Path<String>,
) -> Result<Response> {
    if !Game::is_known(&game) {
        return Err(AppError::NotFound);
    }

    let path = state.config.templates_dir.join(&game).join("index.html");
    let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            tracing::warn!("Missing game page: {:?}", path);
            AppError::NotFound
        } else {
            AppError::Io(e)
        }
    })?;

    let session = Session::from_headers(&headers, &state.config.secret_key);
    Ok(Html(inject_current_user(&html, session.identity())).into_response())
}

/// GET /<game>/<path>
///
/// Any other file from the game's template folder.
pub async fn game_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((game, path)): Path<(String, String)>,
) -> Result<Response> {
    if !Game::is_known(&game) {
        return Err(AppError::NotFound);
    }

    if path.is_empty() || path == "index.html" {
        return game_index(State(state), headers, Path(game)).await;
    }

    let request = Request::builder()
        .uri(format!("/{path}"))
        .body(Body::empty())
        .map_err(|_| AppError::NotFound)?;

    let dir = ServeDir::new(state.config.templates_dir.join(&game));
    match dir.oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new)),
        Err(never) => match never {},
    }
}
