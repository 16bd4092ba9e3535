//! Admin authentication: password verification and server-issued sessions.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{AdminCredentials, AdminSession};
use crate::domain::repositories::AdminRepository;
use crate::error::AppError;
use crate::utils::secrets::{SALT_LENGTH_BYTES, fill_random, generate_recovery_code, generate_token};
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// A freshly issued session. The raw token is only ever returned here.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub username: String,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Outcome of a successful account recovery.
#[derive(Debug, Clone)]
pub struct Recovery {
    pub session: IssuedSession,
    /// Replaces the code that was just used.
    pub recovery_code: String,
}

/// Service for authenticating admin requests via Bearer session tokens.
///
/// Passwords and recovery codes are stored as `salt$mac`, where `mac` is
/// HMAC-SHA256 keyed by `signing_secret` over the salt followed by the secret
/// value. Session tokens are random and stored as an unsalted keyed hash so they
/// can be looked up directly. An attacker with read-only access to the database
/// cannot verify or forge any of them without the server-side secret.
pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    signing_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - admin repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when credentials were created
    /// - `session_ttl` - lifetime of issued sessions
    pub fn new(
        repository: Arc<dyn AdminRepository>,
        signing_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            signing_secret,
            session_ttl,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Hashes a raw session token. Returns a 64-character lowercase hex MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = self.mac();
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Hashes a password or recovery code with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system RNG is unavailable.
    pub fn hash_secret(&self, secret: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LENGTH_BYTES];
        fill_random(&mut salt)?;

        let mut mac = self.mac();
        mac.update(&salt);
        mac.update(secret.as_bytes());

        Ok(format!(
            "{}${}",
            hex::encode(salt),
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    /// Checks `secret` against a `salt$mac` hash in constant time.
    ///
    /// Malformed hashes never verify.
    pub fn verify_secret(&self, secret: &str, stored: &str) -> bool {
        let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
            return false;
        };

        let mut mac = self.mac();
        mac.update(&salt);
        mac.update(secret.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    fn check_password_strength(password: &str) -> Result<(), AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "Password too short",
                json!({ "min_length": MIN_PASSWORD_LENGTH }),
            ));
        }
        Ok(())
    }

    fn invalid_credentials() -> AppError {
        AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Invalid username or password"}),
        )
    }

    async fn issue_session(&self, admin: &AdminCredentials) -> Result<IssuedSession, AppError> {
        let token = generate_token()?;
        let expires_at = Utc::now() + self.session_ttl;

        self.repository
            .create_session(&self.hash_token(&token), admin.id, expires_at)
            .await?;

        Ok(IssuedSession {
            token,
            username: admin.username.clone(),
            expires_at,
        })
    }

    /// Creates an admin account and returns its one-time recovery code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a short password and
    /// [`AppError::Conflict`] if the username is taken.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AdminCredentials, String), AppError> {
        Self::check_password_strength(password)?;

        let recovery_code = generate_recovery_code();
        let admin = self
            .repository
            .create_credentials(
                username,
                &self.hash_secret(password)?,
                &self.hash_secret(&recovery_code)?,
            )
            .await?;

        info!(admin_id = admin.id, username, "Admin account created");
        Ok((admin, recovery_code))
    }

    /// Verifies a username/password pair and issues a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown users, inactive accounts,
    /// and wrong passwords alike.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, AppError> {
        let admin = self
            .repository
            .find_by_username(username)
            .await?
            .filter(|a| a.is_active);

        let Some(admin) = admin else {
            warn!(username, "Admin login failed: unknown or inactive account");
            return Err(Self::invalid_credentials());
        };

        if !self.verify_secret(password, &admin.password_hash) {
            warn!(username, "Admin login failed: wrong password");
            return Err(Self::invalid_credentials());
        }

        let session = self.issue_session(&admin).await?;

        metrics::counter!("admin_logins_total").increment(1);
        info!(admin_id = admin.id, username, "Admin logged in");

        Ok(session)
    }

    /// Resolves a raw Bearer token to its live session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired, or
    /// belongs to a deactivated account.
    pub async fn authenticate(&self, token: &str) -> Result<AdminSession, AppError> {
        let token_hash = self.hash_token(token);

        let Some(session) = self.repository.find_session(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked session"}),
            ));
        };

        if session.is_expired() {
            let _ = self.repository.delete_session(&token_hash).await;
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Session expired"}),
            ));
        }

        Ok(session)
    }

    /// Ends the session identified by `token`.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.repository.delete_session(&self.hash_token(token)).await
    }

    /// Changes the password of the session's account and revokes every other
    /// session of that account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `current_password` is wrong and
    /// [`AppError::Validation`] if the new password is too short.
    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let session = self.authenticate(token).await?;
        Self::check_password_strength(new_password)?;

        let admin = self
            .repository
            .find_by_username(&session.username)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        if !self.verify_secret(current_password, &admin.password_hash) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Current password is incorrect"}),
            ));
        }

        self.repository
            .update_password(admin.id, &self.hash_secret(new_password)?)
            .await?;
        let revoked = self
            .repository
            .delete_other_sessions(admin.id, Some(session.token_hash))
            .await?;

        info!(admin_id = admin.id, revoked, "Admin password changed");
        Ok(())
    }

    /// Resets a forgotten password with the account's recovery code.
    ///
    /// The used code is replaced by a new one, all existing sessions are
    /// revoked, and a fresh session is issued.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the username or recovery code is wrong.
    pub async fn recover(
        &self,
        username: &str,
        recovery_code: &str,
        new_password: &str,
    ) -> Result<Recovery, AppError> {
        Self::check_password_strength(new_password)?;

        let admin = self
            .repository
            .find_by_username(username)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(Self::invalid_credentials)?;

        if !self.verify_secret(recovery_code.trim(), &admin.recovery_code_hash) {
            warn!(username, "Admin recovery failed: wrong recovery code");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid recovery code"}),
            ));
        }

        let next_code = generate_recovery_code();
        self.repository
            .reset_credentials(
                admin.id,
                &self.hash_secret(new_password)?,
                &self.hash_secret(&next_code)?,
            )
            .await?;
        self.repository.delete_other_sessions(admin.id, None).await?;

        let session = self.issue_session(&admin).await?;
        info!(admin_id = admin.id, username, "Admin account recovered");

        Ok(Recovery {
            session,
            recovery_code: next_code,
        })
    }
}
