//! Login and registration.
//!
//! Built-in accounts are checked before registered users and their names are
//! reserved, so a registered user can never shadow or be shadowed by one.

use crate::config::BuiltinAccount;
use crate::constants::{
    MSG_EMPTY_FIELDS, MSG_PASSWORD_MISMATCH, MSG_USERNAME_EXISTS, MSG_USERNAME_RESERVED,
    MSG_USERNAME_TOO_LONG,
};
use crate::error::Result;
use crate::models::Username;
use crate::users::UserStore;

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(String),
    Rejected,
}

/// Why a registration was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    TooLong,
    Mismatch,
    Reserved,
    Exists,
}

impl RejectReason {
    /// Message shown to the visitor
    pub fn message(self) -> &'static str {
        match self {
            RejectReason::Empty => MSG_EMPTY_FIELDS,
            RejectReason::TooLong => MSG_USERNAME_TOO_LONG,
            RejectReason::Mismatch => MSG_PASSWORD_MISMATCH,
            RejectReason::Reserved => MSG_USERNAME_RESERVED,
            RejectReason::Exists => MSG_USERNAME_EXISTS,
        }
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(String),
    Rejected(RejectReason),
}

#[derive(Clone)]
pub struct AuthService {
    builtin: Vec<BuiltinAccount>,
    users: UserStore,
}

impl AuthService {
    pub fn new(builtin: Vec<BuiltinAccount>, users: UserStore) -> Self {
        Self { builtin, users }
    }

    fn is_builtin(&self, username: &str) -> bool {
        self.builtin.iter().any(|a| a.username == username)
    }

    /// Check credentials: built-in accounts first, then the user store
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Ok(LoginOutcome::Rejected);
        }

        if let Some(account) = self.builtin.iter().find(|a| a.username == username) {
            if account.password == password {
                tracing::info!("Built-in account logged in: {}", username);
                return Ok(LoginOutcome::Authenticated(account.username.clone()));
            }
            tracing::warn!("Failed login for built-in account: {}", username);
            return Ok(LoginOutcome::Rejected);
        }

        if self.users.verify(username, password).await? {
            tracing::info!("User logged in: {}", username);
            Ok(LoginOutcome::Authenticated(username.to_string()))
        } else {
            tracing::warn!("Failed login for: {}", username);
            Ok(LoginOutcome::Rejected)
        }
    }

    /// Create an account after the form checks pass
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<RegisterOutcome> {
        let trimmed = username.trim();
        if trimmed.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Ok(RegisterOutcome::Rejected(RejectReason::Empty));
        }

        let Some(username) = Username::normalize(trimmed) else {
            return Ok(RegisterOutcome::Rejected(RejectReason::TooLong));
        };

        if password != confirm_password {
            return Ok(RegisterOutcome::Rejected(RejectReason::Mismatch));
        }

        if self.is_builtin(username) {
            tracing::warn!("Registration attempt with reserved name: {}", username);
            return Ok(RegisterOutcome::Rejected(RejectReason::Reserved));
        }

        if !self.users.create(username, password).await? {
            return Ok(RegisterOutcome::Rejected(RejectReason::Exists));
        }

        Ok(RegisterOutcome::Registered(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> AuthService {
        let db = open_database(temp_dir.path().join("portal.db")).unwrap();
        let builtin = vec![BuiltinAccount {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }];
        AuthService::new(builtin, UserStore::new(db))
    }

    #[tokio::test]
    async fn test_builtin_login() {
        let temp_dir = TempDir::new().unwrap();
        let auth = service(&temp_dir);

        assert_eq!(
            auth.login("admin", "admin").await.unwrap(),
            LoginOutcome::Authenticated("admin".to_string())
        );
        assert_eq!(
            auth.login("admin", "wrong").await.unwrap(),
            LoginOutcome::Rejected
        );
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let temp_dir = TempDir::new().unwrap();
        let auth = service(&temp_dir);

        assert_eq!(
            auth.register("Ana", "s3nha", "s3nha").await.unwrap(),
            RegisterOutcome::Registered("Ana".to_string())
        );
        assert_eq!(
            auth.login("Ana", "s3nha").await.unwrap(),
            LoginOutcome::Authenticated("Ana".to_string())
        );
        assert_eq!(
            auth.login("Ana", "other").await.unwrap(),
            LoginOutcome::Rejected
        );
        assert_eq!(
            auth.login("Bia", "s3nha").await.unwrap(),
            LoginOutcome::Rejected
        );
    }

    #[tokio::test]
    async fn test_register_rejections() {
        let temp_dir = TempDir::new().unwrap();
        let auth = service(&temp_dir);

        let long = "x".repeat(21);
        let cases = [
            ("", "a", "a", RejectReason::Empty),
            ("Ana", "", "", RejectReason::Empty),
            ("Ana", "a", "", RejectReason::Empty),
            (long.as_str(), "a", "a", RejectReason::TooLong),
            ("Ana", "a", "b", RejectReason::Mismatch),
            ("admin", "a", "a", RejectReason::Reserved),
        ];

        for (username, password, confirm, reason) in cases {
            assert_eq!(
                auth.register(username, password, confirm).await.unwrap(),
                RegisterOutcome::Rejected(reason),
                "registering {username:?}"
            );
        }

        auth.register("Ana", "a", "a").await.unwrap();
        assert_eq!(
            auth.register("Ana", "b", "b").await.unwrap(),
            RegisterOutcome::Rejected(RejectReason::Exists)
        );
    }
}
