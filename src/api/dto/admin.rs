//! DTOs for admin authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{IssuedSession, Recovery};
use crate::domain::entities::AdminSession;

/// Request body for `POST /api/admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 256, message = "must not be empty"))]
    pub password: String,
}

/// A newly issued session token. The token is shown exactly once.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedSession> for SessionResponse {
    fn from(s: IssuedSession) -> Self {
        SessionResponse {
            token: s.token,
            username: s.username,
            expires_at: s.expires_at,
        }
    }
}

/// Response for `GET /api/admin/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&AdminSession> for MeResponse {
    fn from(s: &AdminSession) -> Self {
        MeResponse {
            username: s.username.clone(),
            expires_at: s.expires_at,
        }
    }
}

/// Request body for `POST /api/admin/password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub current_password: String,
    #[validate(length(max = 256))]
    pub new_password: String,
}

/// Request body for `POST /api/admin/recover`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecoverRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 64))]
    pub recovery_code: String,
    #[validate(length(max = 256))]
    pub new_password: String,
}

/// Response for a successful recovery: a fresh session plus the
/// replacement recovery code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub recovery_code: String,
}

impl From<Recovery> for RecoverResponse {
    fn from(r: Recovery) -> Self {
        RecoverResponse {
            session: r.session.into(),
            recovery_code: r.recovery_code,
        }
    }
}
