//! Bearer session authentication middleware for admin routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::AdminSession;
use crate::{error::AppError, state::AppState};

/// The authenticated admin, inserted into request extensions by [`layer`].
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Raw Bearer token of the current request.
    pub token: String,
    pub session: AdminSession,
}

/// Authenticates requests using session tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Look up the keyed token hash among live sessions
/// 3. Reject expired sessions and deactivated accounts
/// 4. Attach [`AdminContext`] to the request and continue
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// session is unknown, expired, or revoked.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/admin/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let session = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AdminContext { token, session });

    Ok(next.run(req).await)
}
