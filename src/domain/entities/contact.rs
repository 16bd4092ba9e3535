//! Contact form message entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::InvalidInput;

/// Inbox state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Unread,
    Read,
    Responded,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Responded => "responded",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "responded" => Ok(Self::Responded),
            other => Err(InvalidInput::new(
                "status",
                format!("unknown message status '{other}'"),
            )),
        }
    }
}

/// A message left through the contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// What the visitor is asking about, e.g. `"financing"`.
    pub interest: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

/// Input data for a contact form submission. New messages start unread.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interest: String,
    pub message: String,
}
