//! Service appointment requests.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{BookingStatus, NewServiceBooking, ServiceBooking};
use crate::domain::repositories::BookingRepository;
use crate::error::AppError;

pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    /// Records a visitor's booking request with status `pending`.
    pub async fn submit(&self, booking: NewServiceBooking) -> Result<ServiceBooking, AppError> {
        let booking = self.repository.create(booking).await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = booking.id,
            service_type = %booking.service_type,
            preferred_date = %booking.preferred_date,
            "Service booking received"
        );

        Ok(booking)
    }

    pub async fn list(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<ServiceBooking>, AppError> {
        self.repository.list(status).await
    }

    /// Moves a booking to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the booking does not exist, or
    /// [`AppError::Conflict`] if the transition is not allowed (for example,
    /// reopening a cancelled booking) or another update got there first.
    pub async fn update_status(
        &self,
        id: i64,
        next: BookingStatus,
    ) -> Result<ServiceBooking, AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found", json!({ "id": id })))?;

        if !booking.status.can_transition_to(next) {
            return Err(AppError::conflict(
                "Booking status transition not allowed",
                json!({ "id": id, "from": booking.status.as_str(), "to": next.as_str() }),
            ));
        }

        let booking = self
            .repository
            .update_status(id, booking.status, next)
            .await?
            .ok_or_else(|| {
                AppError::conflict(
                    "Booking status changed concurrently",
                    json!({ "id": id, "from": booking.status.as_str(), "to": next.as_str() }),
                )
            })?;
        info!(booking_id = id, status = %next, "Booking status changed");
        Ok(booking)
    }
}
