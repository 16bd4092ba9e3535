//! Repository trait for customer testimonials.

use crate::domain::entities::{NewTestimonial, Testimonial};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for testimonials and their moderation state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    /// Lists testimonials, newest first. `Some(true)` restricts to approved ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, approved: Option<bool>) -> Result<Vec<Testimonial>, AppError>;

    /// Stores a submission. New testimonials are never approved.
    async fn create(&self, testimonial: NewTestimonial) -> Result<Testimonial, AppError>;

    /// Sets the approval flag. Returns `Ok(None)` if the testimonial does not exist.
    async fn set_approved(&self, id: i64, approved: bool)
    -> Result<Option<Testimonial>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
