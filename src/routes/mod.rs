pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
pub mod scores;
pub mod validation;

pub use admin::{admin_panel, rename_user};
pub use auth::{login, login_form, logout, register, register_form};
pub use health::health_check;
pub use pages::{game_asset, game_index, game_redirect, index};
pub use scores::{get_scores, submit_score};
pub use validation::{parse_score, require_identity};
