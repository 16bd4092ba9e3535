//! PostgreSQL implementations of the catalog repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewServiceOffering, NewTestimonial, ServiceOffering, Testimonial};
use crate::domain::repositories::{OfferingRepository, TestimonialRepository};
use crate::error::AppError;

const OFFERING_COLUMNS: &str = "id, name, description, starting_price, category, icon, image, \
     image_url, features, duration, is_active";

const TESTIMONIAL_COLUMNS: &str =
    "id, name, role, rating, comment, image, is_approved, created_at";

#[derive(FromRow)]
struct OfferingRow {
    id: i64,
    name: String,
    description: String,
    starting_price: Decimal,
    category: String,
    icon: String,
    image: Option<String>,
    image_url: Option<String>,
    features: Vec<String>,
    duration: Option<String>,
    is_active: bool,
}

impl From<OfferingRow> for ServiceOffering {
    fn from(row: OfferingRow) -> Self {
        ServiceOffering {
            id: row.id,
            name: row.name,
            description: row.description,
            starting_price: row.starting_price,
            category: row.category,
            icon: row.icon,
            image: row.image,
            image_url: row.image_url,
            features: row.features,
            duration: row.duration,
            is_active: row.is_active,
        }
    }
}

#[derive(FromRow)]
struct TestimonialRow {
    id: i64,
    name: String,
    role: String,
    rating: i32,
    comment: String,
    image: Option<String>,
    is_approved: bool,
    created_at: DateTime<Utc>,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Testimonial {
            id: row.id,
            name: row.name,
            role: row.role,
            rating: row.rating,
            comment: row.comment,
            image: row.image,
            is_approved: row.is_approved,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for service offerings.
pub struct PgOfferingRepository {
    pool: Arc<PgPool>,
}

impl PgOfferingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferingRepository for PgOfferingRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<ServiceOffering>, AppError> {
        let rows: Vec<OfferingRow> = sqlx::query_as(&format!(
            "SELECT {OFFERING_COLUMNS} FROM services WHERE (NOT $1 OR is_active) ORDER BY id"
        ))
        .bind(active_only)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ServiceOffering::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError> {
        let row: Option<OfferingRow> = sqlx::query_as(&format!(
            "SELECT {OFFERING_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ServiceOffering::from))
    }

    async fn create(&self, o: NewServiceOffering) -> Result<ServiceOffering, AppError> {
        let row: OfferingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO services (name, description, starting_price, category, icon, image,
                                  image_url, features, duration, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {OFFERING_COLUMNS}
            "#
        ))
        .bind(o.name)
        .bind(o.description)
        .bind(o.starting_price)
        .bind(o.category)
        .bind(o.icon)
        .bind(o.image)
        .bind(o.image_url)
        .bind(o.features)
        .bind(o.duration)
        .bind(o.is_active)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, o: ServiceOffering) -> Result<ServiceOffering, AppError> {
        let id = o.id;
        let row: Option<OfferingRow> = sqlx::query_as(&format!(
            r#"
            UPDATE services SET
                name = $2, description = $3, starting_price = $4, category = $5, icon = $6,
                image = $7, image_url = $8, features = $9, duration = $10, is_active = $11
            WHERE id = $1
            RETURNING {OFFERING_COLUMNS}
            "#
        ))
        .bind(o.id)
        .bind(o.name)
        .bind(o.description)
        .bind(o.starting_price)
        .bind(o.category)
        .bind(o.icon)
        .bind(o.image)
        .bind(o.image_url)
        .bind(o.features)
        .bind(o.duration)
        .bind(o.is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ServiceOffering::from)
            .ok_or_else(|| AppError::not_found("Service not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL repository for testimonials.
pub struct PgTestimonialRepository {
    pool: Arc<PgPool>,
}

impl PgTestimonialRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialRepository for PgTestimonialRepository {
    async fn list(&self, approved: Option<bool>) -> Result<Vec<Testimonial>, AppError> {
        let rows: Vec<TestimonialRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TESTIMONIAL_COLUMNS}
            FROM testimonials
            WHERE ($1::boolean IS NULL OR is_approved = $1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(approved)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    async fn create(&self, t: NewTestimonial) -> Result<Testimonial, AppError> {
        let row: TestimonialRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO testimonials (name, role, rating, comment, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TESTIMONIAL_COLUMNS}
            "#
        ))
        .bind(t.name)
        .bind(t.role)
        .bind(t.rating)
        .bind(t.comment)
        .bind(t.image)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn set_approved(&self, id: i64, approved: bool) -> Result<Option<Testimonial>, AppError> {
        let row: Option<TestimonialRow> = sqlx::query_as(&format!(
            "UPDATE testimonials SET is_approved = $2 WHERE id = $1 RETURNING {TESTIMONIAL_COLUMNS}"
        ))
        .bind(id)
        .bind(approved)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Testimonial::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
