//! Repository trait for contact form messages.

use crate::domain::entities::{ContactMessage, MessageStatus, NewContactMessage};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Stores a message with status `unread`.
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, AppError>;

    /// Lists messages newest first, optionally restricted to one status.
    async fn list(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the message does not exist.
    async fn update_status(
        &self,
        id: i64,
        status: MessageStatus,
    ) -> Result<ContactMessage, AppError>;

    async fn count_by_status(&self) -> Result<Vec<(MessageStatus, i64)>, AppError>;
}
