//! Contact form inbox.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{ContactMessage, MessageStatus, NewContactMessage};
use crate::domain::repositories::ContactRepository;
use crate::error::AppError;

pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    /// Stores a visitor's message with status `unread`.
    pub async fn submit(&self, message: NewContactMessage) -> Result<ContactMessage, AppError> {
        let message = self.repository.create(message).await?;

        metrics::counter!("contact_messages_total").increment(1);
        info!(message_id = message.id, interest = %message.interest, "Contact message received");

        Ok(message)
    }

    pub async fn list(
        &self,
        status: Option<MessageStatus>,
    ) -> Result<Vec<ContactMessage>, AppError> {
        self.repository.list(status).await
    }

    /// Marks a message read or responded. Any status may follow any other.
    pub async fn update_status(
        &self,
        id: i64,
        status: MessageStatus,
    ) -> Result<ContactMessage, AppError> {
        self.repository.update_status(id, status).await
    }
}
