//! Repository trait for the service department catalog.

use crate::domain::entities::{NewServiceOffering, ServiceOffering};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for service offerings (oil changes, detailing, ...).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOfferingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferingRepository: Send + Sync {
    /// Lists offerings ordered by id. With `active_only`, hidden offerings are skipped.
    async fn list(&self, active_only: bool) -> Result<Vec<ServiceOffering>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError>;

    async fn create(&self, offering: NewServiceOffering) -> Result<ServiceOffering, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no offering has `offering.id`.
    async fn update(&self, offering: ServiceOffering) -> Result<ServiceOffering, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
