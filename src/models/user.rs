use serde::{Deserialize, Serialize};

use crate::constants::MAX_USERNAME_LEN;

/// User record stored in redb
/// Uses Unix timestamp for compact storage with bincode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// PBKDF2-HMAC-SHA256 of the password (hex)
    pub password_hash: String,
    /// Random salt used for the hash (hex)
    pub salt: String,
    /// When the user was created (Unix timestamp)
    pub created_at: i64,
}

/// Username rules shared by registration and score submission
pub struct Username;

impl Username {
    /// Trim surrounding whitespace and check the length rule
    ///
    /// Returns `None` when the trimmed name is empty or longer than
    /// [`MAX_USERNAME_LEN`] characters.
    pub fn normalize(raw: &str) -> Option<&str> {
        let name = raw.trim();
        let len = name.chars().count();
        (1..=MAX_USERNAME_LEN).contains(&len).then_some(name)
    }
}
