//! Handlers for admin sessions.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::admin::{
    ChangePasswordRequest, LoginRequest, MeResponse, RecoverRequest, RecoverResponse,
    SessionResponse,
};
use crate::api::middleware::auth::AdminContext;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges a username and password for a session token.
///
/// # Endpoint
///
/// `POST /api/admin/login`
///
/// # Response
///
/// ```json
/// {"token": "...", "username": "admin", "expiresAt": "2026-10-20T08:00:00Z"}
/// ```
///
/// # Errors
///
/// Returns 401 for unknown users, deactivated accounts and wrong passwords
/// alike.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .login(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// `POST /api/admin/logout`: ends the current session.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&admin.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/admin/me`: the account behind the current session.
pub async fn me_handler(Extension(admin): Extension<AdminContext>) -> Json<MeResponse> {
    Json(MeResponse::from(&admin.session))
}

/// Changes the password and revokes every other session of the account.
///
/// # Endpoint
///
/// `POST /api/admin/password`
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .auth_service
        .change_password(&admin.token, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resets a forgotten password with the account's recovery code.
///
/// # Endpoint
///
/// `POST /api/admin/recover`
///
/// All sessions of the account are revoked. The response carries a new
/// session and the replacement recovery code.
pub async fn recover_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecoverRequest>,
) -> Result<Json<RecoverResponse>, AppError> {
    payload.validate()?;

    let recovery = state
        .auth_service
        .recover(
            payload.username.trim(),
            &payload.recovery_code,
            &payload.new_password,
        )
        .await?;

    Ok(Json(recovery.into()))
}
