//! Repository trait for admin credentials and login sessions.

use crate::domain::entities::{AdminCredentials, AdminSession};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for admin accounts and their sessions.
///
/// Only keyed hashes are ever passed in: raw passwords, recovery codes and
/// session tokens never reach the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdminRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Creates an active admin account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_credentials(
        &self,
        username: &str,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<AdminCredentials, AppError>;

    /// Finds an account by username, active or not.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminCredentials>, AppError>;

    async fn list_credentials(&self) -> Result<Vec<AdminCredentials>, AppError>;

    /// Replaces the password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn update_password(&self, admin_id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Replaces both the password hash and the recovery code hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn reset_credentials(
        &self,
        admin_id: i64,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<(), AppError>;

    /// Marks an account inactive. Returns `Ok(false)` if no such account.
    async fn deactivate(&self, username: &str) -> Result<bool, AppError>;

    async fn create_session(
        &self,
        token_hash: &str,
        admin_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Looks up a session joined with its account. Sessions of inactive
    /// accounts are not returned.
    async fn find_session(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError>;

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError>;

    /// Deletes every session of `admin_id` except `keep_token_hash`.
    /// Returns the number removed.
    async fn delete_other_sessions(
        &self,
        admin_id: i64,
        keep_token_hash: Option<String>,
    ) -> Result<u64, AppError>;

    /// Removes expired sessions. Returns the number removed.
    async fn purge_expired_sessions(&self) -> Result<u64, AppError>;
}
