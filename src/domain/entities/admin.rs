//! Admin credential and session entities.

use chrono::{DateTime, Utc};

/// Login credentials for the admin area.
///
/// `password_hash` and `recovery_code_hash` are keyed hashes produced by
/// [`crate::application::services::AuthService`]; raw secrets are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub recovery_code_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A server-issued admin session.
///
/// Only the keyed hash of the bearer token is stored, so a database leak does
/// not expose usable tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub token_hash: String,
    pub admin_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Returns true if the session has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
