//! Types shared by portal implementations.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the login handshake.
///
/// Bad credentials, a rejected session and transport failures are all
/// reported as [`AuthError::InvalidCredentials`]; callers only ever see one
/// generic message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Organizational unit the authenticated user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub i64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portal login credentials.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated portal session.
///
/// Wraps the HTTP client whose private cookie jar holds the authentication
/// cookies. Every report request for this user goes through it.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    unit_id: UnitId,
    started_at: DateTime<Utc>,
    http: Client,
}

impl Session {
    pub fn new(username: impl Into<String>, unit_id: UnitId, http: Client) -> Self {
        Self {
            username: username.into(),
            unit_id,
            started_at: Utc::now(),
            http,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// HTTP client carrying this session's cookies.
    pub fn http(&self) -> &Client {
        &self.http
    }
}
