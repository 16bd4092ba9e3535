//! Repository trait for vehicle inventory.

use crate::domain::entities::{Car, NewCar};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the car inventory.
///
/// Search runs in memory over [`CarRepository::list_all`], so the store only
/// needs plain CRUD.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCarRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Returns every listing ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Car>, AppError>;

    /// Finds a listing by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError>;

    /// Inserts a new listing and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the VIN is already listed.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError>;

    /// Overwrites all mutable columns of `car`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has `car.id`.
    /// Returns [`AppError::Conflict`] if the VIN collides with another listing.
    async fn update(&self, car: Car) -> Result<Car, AppError>;

    /// Deletes a listing. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts listings. Doubles as the database health probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
