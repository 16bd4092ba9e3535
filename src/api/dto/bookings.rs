//! DTOs for service bookings.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::{BookingStatus, NewServiceBooking, ServiceBooking};

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-.]{7,20}$").expect("valid phone regex"));

fn iso_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date").with_message("must be YYYY-MM-DD".into()))
}

/// Request body for `POST /api/service-bookings`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1 to 120 characters"))]
    pub full_name: String,
    #[validate(regex(path = "*PHONE_REGEX", message = "must be a phone number"))]
    pub phone: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub vehicle_info: String,
    #[validate(length(min = 1, max = 120))]
    pub service_type: String,
    #[validate(custom(function = "iso_date"))]
    pub preferred_date: String,
    #[validate(length(min = 1, max = 32))]
    pub preferred_time: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<CreateBookingRequest> for NewServiceBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewServiceBooking {
            full_name: req.full_name.trim().to_string(),
            phone: req.phone.trim().to_string(),
            email: req.email.filter(|e| !e.is_empty()),
            vehicle_info: req.vehicle_info,
            service_type: req.service_type,
            preferred_date: req.preferred_date,
            preferred_time: req.preferred_time,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub vehicle_info: String,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub description: Option<String>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceBooking> for BookingResponse {
    fn from(b: ServiceBooking) -> Self {
        BookingResponse {
            id: b.id,
            full_name: b.full_name,
            phone: b.phone,
            email: b.email,
            vehicle_info: b.vehicle_info,
            service_type: b.service_type,
            preferred_date: b.preferred_date,
            preferred_time: b.preferred_time,
            description: b.description,
            status: b.status.as_str(),
            created_at: b.created_at,
        }
    }
}

/// Query parameters for `GET /api/service-bookings`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

/// Request body for `PATCH /api/service-bookings/{id}`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    #[serde_as(as = "DisplayFromStr")]
    pub status: BookingStatus,
}
