use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::{LoginOutcome, RegisterOutcome};
use crate::constants::{MSG_INTERNAL_ERROR, MSG_LOGGED_OUT, MSG_LOGIN_FAILED, MSG_REGISTERED};
use crate::render::{login_page, register_page};
use crate::routes::pages::html_page;
use crate::session::{flash_cookie, login_cookie, logout_cookie, Flash, Session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub senha: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub confirmar_senha: String,
}

/// Redirect somewhere with a flash message for the next page
fn redirect_with_flash(to: &str, flash: Flash, secret: &str) -> Response {
    (
        AppendHeaders([(SET_COOKIE, flash_cookie(&flash, secret))]),
        Redirect::to(to),
    )
        .into_response()
}

/// GET /login
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::from_headers(&headers, &state.config.secret_key);
    if session.identity().is_some() {
        return Redirect::to("/").into_response();
    }
    html_page(login_page(session.flash()), &session)
}

/// POST /login
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth.login(&form.usuario, &form.senha).await {
        Ok(LoginOutcome::Authenticated(identity)) => (
            AppendHeaders([(
                SET_COOKIE,
                login_cookie(&identity, &state.config.secret_key),
            )]),
            Redirect::to("/"),
        )
            .into_response(),
        Ok(LoginOutcome::Rejected) => {
            Html(login_page(Some(&Flash::error(MSG_LOGIN_FAILED)))).into_response()
        }
        Err(e) => {
            tracing::error!("Login failed with internal error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(login_page(Some(&Flash::error(MSG_INTERNAL_ERROR)))),
            )
                .into_response()
        }
    }
}

/// GET /register
pub async fn register_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::from_headers(&headers, &state.config.secret_key);
    html_page(register_page(session.flash()), &session)
}

/// POST /register
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let secret = &state.config.secret_key;

    match state
        .auth
        .register(&form.usuario, &form.senha, &form.confirmar_senha)
        .await
    {
        Ok(RegisterOutcome::Registered(_)) => {
            redirect_with_flash("/login", Flash::success(MSG_REGISTERED), secret)
        }
        Ok(RegisterOutcome::Rejected(reason)) => {
            tracing::info!("Registration rejected: {:?}", reason);
            redirect_with_flash("/register", Flash::error(reason.message()), secret)
        }
        Err(e) => {
            tracing::error!("Registration failed with internal error: {:?}", e);
            redirect_with_flash("/register", Flash::error(MSG_INTERNAL_ERROR), secret)
        }
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([
            (SET_COOKIE, logout_cookie()),
            (
                SET_COOKIE,
                flash_cookie(&Flash::success(MSG_LOGGED_OUT), &state.config.secret_key),
            ),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}
