//! Handlers for service offerings and testimonials.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::catalog::{
    CreateOfferingRequest, CreateTestimonialRequest, ModerateTestimonialRequest,
    OfferingResponse, TestimonialResponse, TestimonialsQuery, UpdateOfferingRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/services`: active offerings only.
pub async fn list_services_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferingResponse>>, AppError> {
    let offerings = state.catalog_service.list_offerings(false).await?;
    Ok(Json(offerings.into_iter().map(Into::into).collect()))
}

/// `GET /api/services/{id}`: 404 for unknown and inactive offerings.
pub async fn get_service_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OfferingResponse>, AppError> {
    let offering = state.catalog_service.get_offering(id, false).await?;
    Ok(Json(offering.into()))
}

/// `GET /api/admin/services`: every offering, including inactive ones.
pub async fn admin_list_services_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferingResponse>>, AppError> {
    let offerings = state.catalog_service.list_offerings(true).await?;
    Ok(Json(offerings.into_iter().map(Into::into).collect()))
}

/// `POST /api/services` (admin)
pub async fn create_service_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateOfferingRequest>,
) -> Result<(StatusCode, Json<OfferingResponse>), AppError> {
    payload.validate()?;

    let offering = state
        .catalog_service
        .create_offering(payload.into_new_offering()?)
        .await?;

    Ok((StatusCode::CREATED, Json(offering.into())))
}

/// `PATCH /api/services/{id}` (admin)
pub async fn update_service_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOfferingRequest>,
) -> Result<Json<OfferingResponse>, AppError> {
    payload.validate()?;

    let offering = state
        .catalog_service
        .update_offering(id, payload.into_patch()?)
        .await?;

    Ok(Json(offering.into()))
}

/// `DELETE /api/services/{id}` (admin)
pub async fn delete_service_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog_service.delete_offering(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists testimonials shown on the public site.
///
/// # Endpoint
///
/// `GET /api/testimonials`
///
/// Only approved testimonials are ever returned here; moderation happens
/// through `GET /api/admin/testimonials`.
pub async fn list_testimonials_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = state.catalog_service.list_testimonials(Some(true)).await?;
    Ok(Json(testimonials.into_iter().map(Into::into).collect()))
}

/// `GET /api/admin/testimonials?approved=`: moderation queue.
pub async fn admin_list_testimonials_handler(
    State(state): State<AppState>,
    Query(query): Query<TestimonialsQuery>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = state.catalog_service.list_testimonials(query.approved).await?;
    Ok(Json(testimonials.into_iter().map(Into::into).collect()))
}

/// Submits a testimonial for moderation.
///
/// # Endpoint
///
/// `POST /api/testimonials`
///
/// The stored testimonial is always unapproved.
///
/// # Errors
///
/// Returns 400 for a rating outside 1 to 5 or empty fields.
pub async fn submit_testimonial_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<TestimonialResponse>), AppError> {
    payload.validate()?;

    let testimonial = state
        .catalog_service
        .submit_testimonial(payload.into_new_testimonial()?)
        .await?;

    Ok((StatusCode::CREATED, Json(testimonial.into())))
}

/// `PATCH /api/testimonials/{id}` (admin): approve or hide.
pub async fn moderate_testimonial_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ModerateTestimonialRequest>,
) -> Result<Json<TestimonialResponse>, AppError> {
    let testimonial = state
        .catalog_service
        .set_testimonial_approved(id, payload.is_approved)
        .await?;

    Ok(Json(testimonial.into()))
}

/// `DELETE /api/testimonials/{id}` (admin)
pub async fn delete_testimonial_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog_service.delete_testimonial(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
