//! PostgreSQL implementation of admin repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{AdminCredentials, AdminSession};
use crate::domain::repositories::AdminRepository;
use crate::error::AppError;

const CREDENTIAL_COLUMNS: &str =
    "id, username, password_hash, recovery_code_hash, is_active, created_at, updated_at";

#[derive(FromRow)]
struct CredentialsRow {
    id: i64,
    username: String,
    password_hash: String,
    recovery_code_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CredentialsRow> for AdminCredentials {
    fn from(row: CredentialsRow) -> Self {
        AdminCredentials {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            recovery_code_hash: row.recovery_code_hash,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct SessionRow {
    token_hash: String,
    admin_id: i64,
    username: String,
    expires_at: DateTime<Utc>,
}

/// PostgreSQL repository for admin accounts and sessions.
///
/// Stores keyed hashes only. Raw passwords and tokens are never persisted.
pub struct PgAdminRepository {
    pool: Arc<PgPool>,
}

impl PgAdminRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn admin_not_found(admin_id: i64) -> AppError {
    AppError::not_found("Admin account not found", json!({ "id": admin_id }))
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn create_credentials(
        &self,
        username: &str,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<AdminCredentials, AppError> {
        let row: CredentialsRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO admin_credentials (username, password_hash, recovery_code_hash)
            VALUES ($1, $2, $3)
            RETURNING {CREDENTIAL_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(recovery_code_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, AppError> {
        let row: Option<CredentialsRow> = sqlx::query_as(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM admin_credentials WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AdminCredentials::from))
    }

    async fn list_credentials(&self) -> Result<Vec<AdminCredentials>, AppError> {
        let rows: Vec<CredentialsRow> = sqlx::query_as(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM admin_credentials ORDER BY created_at"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AdminCredentials::from).collect())
    }

    async fn update_password(&self, admin_id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE admin_credentials SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(admin_id)
        .bind(password_hash)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(admin_not_found(admin_id));
        }
        Ok(())
    }

    async fn reset_credentials(
        &self,
        admin_id: i64,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE admin_credentials
            SET password_hash = $2, recovery_code_hash = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(admin_id)
        .bind(password_hash)
        .bind(recovery_code_hash)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(admin_not_found(admin_id));
        }
        Ok(())
    }

    async fn deactivate(&self, username: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let admin_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE admin_credentials
            SET is_active = FALSE, updated_at = NOW()
            WHERE username = $1
            RETURNING id
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(admin_id) = admin_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM admin_sessions WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn create_session(
        &self,
        token_hash: &str,
        admin_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO admin_sessions (token_hash, admin_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token_hash)
        .bind(admin_id)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT s.token_hash, s.admin_id, a.username, s.expires_at
            FROM admin_sessions s
            JOIN admin_credentials a ON a.id = s.admin_id
            WHERE s.token_hash = $1
              AND a.is_active
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| AdminSession {
            token_hash: r.token_hash,
            admin_id: r.admin_id,
            username: r.username,
            expires_at: r.expires_at,
        }))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM admin_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_other_sessions(
        &self,
        admin_id: i64,
        keep_token_hash: Option<String>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM admin_sessions
            WHERE admin_id = $1
              AND ($2::text IS NULL OR token_hash <> $2)
            "#,
        )
        .bind(admin_id)
        .bind(keep_token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
