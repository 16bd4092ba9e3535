//! Handlers for service bookings.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::bookings::{
    BookingResponse, BookingsQuery, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Books a service appointment.
///
/// # Endpoint
///
/// `POST /api/service-bookings`
///
/// # Request Body
///
/// ```json
/// {
///   "fullName": "Dana Smith",
///   "phone": "+1 555 010 2030",
///   "email": "dana@example.com",
///   "vehicleInfo": "2019 Honda Civic",
///   "serviceType": "Oil Change",
///   "preferredDate": "2026-11-03",
///   "preferredTime": "10:00"
/// }
/// ```
///
/// The booking is stored with status `pending`.
pub async fn create_booking_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    payload.validate()?;

    let booking = state.booking_service.submit(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// `GET /api/service-bookings?status=` (admin)
pub async fn list_bookings_handler(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state.booking_service.list(query.status).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// Moves a booking through its lifecycle.
///
/// # Endpoint
///
/// `PATCH /api/service-bookings/{id}` (admin)
///
/// # Errors
///
/// Returns 404 for an unknown booking and 409 when the transition is not
/// allowed (completed and cancelled bookings are final).
pub async fn update_booking_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.booking_service.update_status(id, payload.status).await?;
    Ok(Json(booking.into()))
}
