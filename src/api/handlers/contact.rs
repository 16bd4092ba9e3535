//! Handlers for the contact form inbox.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::contact::{
    ContactQuery, ContactResponse, CreateContactRequest, UpdateContactStatusRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/contact`: stores the message as `unread`.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    payload.validate()?;

    let message = state.contact_service.submit(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(message.into())))
}

/// `GET /api/contact?status=` (admin)
pub async fn list_contact_handler(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<ContactResponse>>, AppError> {
    let messages = state.contact_service.list(query.status).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// `PATCH /api/contact/{id}` (admin)
pub async fn update_contact_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactStatusRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let message = state
        .contact_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(message.into()))
}
