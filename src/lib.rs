//! Game Portal Library
//!
//! Game pages, session login and per-game leaderboards behind one axum router.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod render;
pub mod routes;
pub mod security;
pub mod session;
pub mod users;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use auth::AuthService;
use leaderboard::{LeaderboardService, ScoreBackend};
use users::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub leaderboard: LeaderboardService,
    pub auth: AuthService,
}

impl AppState {
    /// Wire the services over the given database, configuration and score backend
    pub fn new(db: Db, config: Config, backend: ScoreBackend) -> Self {
        let auth = AuthService::new(config.builtin_accounts.clone(), UserStore::new(db.clone()));
        Self {
            db,
            config,
            leaderboard: LeaderboardService::new(backend),
            auth,
        }
    }
}

/// Build the portal router
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health_check))
        .route(
            "/api/recordes",
            get(routes::get_scores).post(routes::submit_score),
        )
        .route("/login", get(routes::login_form).post(routes::login))
        .route("/register", get(routes::register_form).post(routes::register))
        .route("/logout", get(routes::logout))
        .route("/admin", get(|| async { Redirect::permanent("/admin/") }))
        .route("/admin/", get(routes::admin_panel))
        .route("/admin/rename", post(routes::rename_user))
        .nest_service("/static", static_dir)
        .route("/:game", get(routes::game_redirect))
        .route("/:game/", get(routes::game_index))
        .route("/:game/*path", get(routes::game_asset))
        .with_state(state)
}
