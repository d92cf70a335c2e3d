use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::constants::MSG_INTERNAL_ERROR;
use crate::error::AppError;
use crate::render::admin_page;
use crate::routes::pages::html_page;
use crate::routes::validation::require_identity;
use crate::session::{flash_cookie, Flash, Session};
use crate::AppState;

/// Form for moving scores between usernames
#[derive(Debug, Deserialize)]
pub struct RenameForm {
    #[serde(default)]
    pub antigo: String,
    #[serde(default)]
    pub novo: String,
}

/// Admin panel with every stored score
///
/// Only the configured admin identity may see it; everyone else is sent to
/// the login page.
///
/// GET /admin/
pub async fn admin_panel(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let secret = &state.config.secret_key;
    let session = Session::from_headers(&headers, secret);
    if let Err(redirect) = require_identity(&session, &state.config.admin_identity, secret) {
        return redirect;
    }

    let records = match state.leaderboard.all_scores().await {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::warn!("Admin panel could not read scores: {}", e);
            None
        }
    };

    tracing::info!(
        "Admin panel requested: {} score rows",
        records.as_ref().map_or(0, Vec::len)
    );

    html_page(
        admin_page(
            &state.config.admin_identity,
            session.flash(),
            records.as_deref(),
        ),
        &session,
    )
}

/// Move every score of one username to another
///
/// POST /admin/rename  form `antigo`, `novo`
pub async fn rename_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RenameForm>,
) -> Response {
    let secret = &state.config.secret_key;
    let session = Session::from_headers(&headers, secret);
    if let Err(redirect) = require_identity(&session, &state.config.admin_identity, secret) {
        return redirect;
    }

    let flash = match state.leaderboard.rename_user(&form.antigo, &form.novo).await {
        Ok(moved) => Flash::success(&format!(
            "{moved} recorde(s) movido(s) de {} para {}",
            form.antigo.trim(),
            form.novo.trim()
        )),
        Err(AppError::InvalidInput(msg)) => Flash::error(&msg),
        Err(e) => {
            tracing::error!("Rename failed: {:?}", e);
            Flash::error(MSG_INTERNAL_ERROR)
        }
    };

    (
        AppendHeaders([(SET_COOKIE, flash_cookie(&flash, secret))]),
        Redirect::to("/admin/"),
    )
        .into_response()
}
