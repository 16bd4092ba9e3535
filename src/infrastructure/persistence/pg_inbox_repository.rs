//! PostgreSQL implementations of the booking and contact repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::InvalidInput;
use crate::domain::entities::{
    BookingStatus, ContactMessage, MessageStatus, NewContactMessage, NewServiceBooking,
    ServiceBooking,
};
use crate::domain::repositories::{BookingRepository, ContactRepository};
use crate::error::AppError;

const BOOKING_COLUMNS: &str = "id, full_name, phone, email, vehicle_info, service_type, \
     preferred_date, preferred_time, description, status, created_at";

const MESSAGE_COLUMNS: &str =
    "id, first_name, last_name, email, phone, interest, message, status, created_at";

fn corrupt_status(table: &'static str, id: i64) -> impl FnOnce(InvalidInput) -> AppError {
    move |e| {
        AppError::internal(
            "Corrupt status column",
            json!({ "table": table, "id": id, "reason": e.to_string() }),
        )
    }
}

#[derive(FromRow)]
struct BookingRow {
    id: i64,
    full_name: String,
    phone: String,
    email: Option<String>,
    vehicle_info: String,
    service_type: String,
    preferred_date: String,
    preferred_time: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for ServiceBooking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(corrupt_status("service_bookings", row.id))?;

        Ok(ServiceBooking {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            email: row.email,
            vehicle_info: row.vehicle_info,
            service_type: row.service_type,
            preferred_date: row.preferred_date,
            preferred_time: row.preferred_time,
            description: row.description,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct MessageRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    interest: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ContactMessage {
    type Error = AppError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let status: MessageStatus = row
            .status
            .parse()
            .map_err(corrupt_status("contact_messages", row.id))?;

        Ok(ContactMessage {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            interest: row.interest,
            message: row.message,
            status,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL repository for service bookings.
pub struct PgBookingRepository {
    pool: Arc<PgPool>,
}

impl PgBookingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, b: NewServiceBooking) -> Result<ServiceBooking, AppError> {
        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO service_bookings (full_name, phone, email, vehicle_info, service_type,
                                          preferred_date, preferred_time, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(b.full_name)
        .bind(b.phone)
        .bind(b.email)
        .bind(b.vehicle_info)
        .bind(b.service_type)
        .bind(b.preferred_date)
        .bind(b.preferred_time)
        .bind(b.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM service_bookings
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ServiceBooking::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceBooking>, AppError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM service_bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ServiceBooking::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<ServiceBooking>, AppError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            r#"
            UPDATE service_bookings SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ServiceBooking::try_from).transpose()
    }

    async fn count_by_status(&self) -> Result<Vec<(BookingStatus, i64)>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM service_bookings GROUP BY status ORDER BY status",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(status, count)| {
                let status: BookingStatus = status
                    .parse()
                    .map_err(corrupt_status("service_bookings", 0))?;
                Ok::<_, AppError>((status, count))
            })
            .collect()
    }
}

/// PostgreSQL repository for contact messages.
pub struct PgContactRepository {
    pool: Arc<PgPool>,
}

impl PgContactRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, m: NewContactMessage) -> Result<ContactMessage, AppError> {
        let row: MessageRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO contact_messages (first_name, last_name, email, phone, interest, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(m.first_name)
        .bind(m.last_name)
        .bind(m.email)
        .bind(m.phone)
        .bind(m.interest)
        .bind(m.message)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, AppError> {
        let rows: Vec<MessageRow> = sqlx::query_as(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM contact_messages
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn update_status(
        &self,
        id: i64,
        status: MessageStatus,
    ) -> Result<ContactMessage, AppError> {
        let row: Option<MessageRow> = sqlx::query_as(&format!(
            "UPDATE contact_messages SET status = $2 WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ContactMessage::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Message not found", json!({ "id": id })))
    }

    async fn count_by_status(&self) -> Result<Vec<(MessageStatus, i64)>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM contact_messages GROUP BY status ORDER BY status",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(status, count)| {
                let status: MessageStatus = status
                    .parse()
                    .map_err(corrupt_status("contact_messages", 0))?;
                Ok::<_, AppError>((status, count))
            })
            .collect()
    }
}
