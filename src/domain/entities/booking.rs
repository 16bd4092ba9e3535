//! Service booking entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::InvalidInput;

/// Lifecycle of a service booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if a booking may move from `self` to `next`.
    ///
    /// Completed and cancelled bookings are final.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        ) || *self == next
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidInput::new(
                "status",
                format!("unknown booking status '{other}'"),
            )),
        }
    }
}

/// A customer's request for a shop appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceBooking {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub vehicle_info: String,
    pub service_type: String,
    /// `YYYY-MM-DD` as entered by the customer.
    pub preferred_date: String,
    /// `HH:MM` as entered by the customer.
    pub preferred_time: String,
    pub description: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Input data for a booking submission. New bookings are always pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceBooking {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub vehicle_info: String,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Confirmed));
    }

    #[test]
    fn test_final_states_are_final() {
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_parse_unknown_status() {
        let err = "done".parse::<BookingStatus>().unwrap_err();
        assert_eq!(err.field, "status");
    }
}
