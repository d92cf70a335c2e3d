use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde_json::Value;

use crate::constants::{ERR_INVALID_SCORE, MSG_LOGIN_REQUIRED};
use crate::error::{AppError, Result};
use crate::session::{flash_cookie, Flash, Session};

/// Read the `score` field of a submission as an integer
///
/// Floats, strings and missing values are rejected rather than coerced.
pub fn parse_score(value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_SCORE.to_string()))
}

/// Allow the request only for one specific identity
///
/// Anyone else is sent to the login page with a flash message.
pub fn require_identity(
    session: &Session,
    expected: &str,
    secret: &str,
) -> std::result::Result<(), Response> {
    if session.is(expected) {
        return Ok(());
    }

    tracing::warn!(
        "Gated page requested by {:?}, expected {}",
        session.identity(),
        expected
    );

    let flash = flash_cookie(&Flash::error(MSG_LOGIN_REQUIRED), secret);
    Err((AppendHeaders([(SET_COOKIE, flash)]), Redirect::to("/login")).into_response())
}
