//! Repository trait for service appointment requests.

use crate::domain::entities::{BookingStatus, NewServiceBooking, ServiceBooking};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for service bookings.
///
/// Transition rules live in [`BookingStatus::can_transition_to`]; the
/// repository only guards against the status having changed underneath.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Stores a booking with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, booking: NewServiceBooking) -> Result<ServiceBooking, AppError>;

    /// Lists bookings newest first, optionally restricted to one status.
    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceBooking>, AppError>;

    /// Moves the booking from `from` to `to` in one conditional write.
    ///
    /// Returns `None` if no booking with `id` currently has status `from`.
    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<ServiceBooking>, AppError>;

    /// Number of bookings per status, for the admin CLI.
    async fn count_by_status(&self) -> Result<Vec<(BookingStatus, i64)>, AppError>;
}
