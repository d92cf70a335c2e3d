//! Cookie-backed sessions.
//!
//! The session cookie carries the identity, the flash cookie carries one
//! message for the next rendered page. Both values are HMAC-sealed with the
//! configured secret key.

use axum::http::{header, HeaderMap};

use crate::constants::{FLASH_COOKIE, SESSION_COOKIE};
use crate::security::{seal, unseal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// A one-shot message shown on the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.to_string(),
        }
    }

    fn encode(&self) -> String {
        format!("{}|{}", self.kind.as_str(), self.message)
    }

    fn decode(raw: &str) -> Option<Self> {
        let (kind, message) = raw.split_once('|')?;
        let kind = match kind {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => return None,
        };
        Some(Self {
            kind,
            message: message.to_string(),
        })
    }
}

/// Session state read from the request cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<String>,
    flash: Option<Flash>,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Self {
        let identity = read_cookie(headers, SESSION_COOKIE)
            .and_then(|value| unseal(value, secret))
            .filter(|identity| !identity.is_empty());

        let flash = read_cookie(headers, FLASH_COOKIE)
            .and_then(|value| unseal(value, secret))
            .and_then(|raw| Flash::decode(&raw));

        Self { identity, flash }
    }

    /// The logged-in username, if any
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Whether the session belongs to exactly this identity
    pub fn is(&self, expected: &str) -> bool {
        self.identity() == Some(expected)
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }
}

/// Find a cookie value by name in the `Cookie` headers
fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")
}

fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// `Set-Cookie` value that logs `identity` in
pub fn login_cookie(identity: &str, secret: &str) -> String {
    cookie(SESSION_COOKIE, &seal(identity, secret))
}

/// `Set-Cookie` value that clears the session
pub fn logout_cookie() -> String {
    expired_cookie(SESSION_COOKIE)
}

/// `Set-Cookie` value carrying a flash message to the next page
pub fn flash_cookie(flash: &Flash, secret: &str) -> String {
    cookie(FLASH_COOKIE, &seal(&flash.encode(), secret))
}

/// `Set-Cookie` value that drops a consumed flash message
pub fn clear_flash_cookie() -> String {
    expired_cookie(FLASH_COOKIE)
}
