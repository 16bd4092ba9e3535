//! DTOs for the contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{ContactMessage, MessageStatus, NewContactMessage};

/// Request body for `POST /api/contact`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 60, message = "must be 1 to 60 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 60, message = "must be 1 to 60 characters"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub interest: String,
    #[validate(length(min = 1, max = 5000, message = "must be 1 to 5000 characters"))]
    pub message: String,
}

impl From<CreateContactRequest> for NewContactMessage {
    fn from(req: CreateContactRequest) -> Self {
        NewContactMessage {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: req.phone.filter(|p| !p.trim().is_empty()),
            interest: req.interest,
            message: req.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interest: String,
    pub message: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactResponse {
    fn from(m: ContactMessage) -> Self {
        ContactResponse {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            interest: m.interest,
            message: m.message,
            status: m.status.as_str(),
            created_at: m.created_at,
        }
    }
}

/// Query parameters for `GET /api/contact`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub status: Option<MessageStatus>,
}

/// Request body for `PATCH /api/contact/{id}`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct UpdateContactStatusRequest {
    #[serde_as(as = "DisplayFromStr")]
    pub status: MessageStatus,
}
