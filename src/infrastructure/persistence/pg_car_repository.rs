//! PostgreSQL implementation of car repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::InvalidInput;
use crate::domain::entities::{Car, CarStatus, NewCar};
use crate::domain::repositories::CarRepository;
use crate::error::AppError;

const CAR_COLUMNS: &str = "id, make, model, year, price, mileage, color, interior_color, \
     fuel_type, transmission, drivetrain, body_style, engine, trim, condition, status, \
     number_of_seats, number_of_doors, mpg_city, mpg_highway, safety_rating, dealer_rating, \
     days_on_market, vehicle_history, financing, images, description, vin, features, created_at";

#[derive(FromRow)]
struct CarRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
    price: Decimal,
    mileage: i32,
    color: String,
    interior_color: Option<String>,
    fuel_type: String,
    transmission: String,
    drivetrain: Option<String>,
    body_style: Option<String>,
    engine: Option<String>,
    trim: Option<String>,
    condition: String,
    status: String,
    number_of_seats: Option<i32>,
    number_of_doors: Option<i32>,
    mpg_city: Option<i32>,
    mpg_highway: Option<i32>,
    safety_rating: Option<Decimal>,
    dealer_rating: Option<Decimal>,
    days_on_market: Option<i32>,
    vehicle_history: Option<String>,
    financing: bool,
    images: Vec<String>,
    description: Option<String>,
    vin: Option<String>,
    features: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CarRow> for Car {
    type Error = AppError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        let status: CarStatus = row.status.parse().map_err(|e: InvalidInput| {
            AppError::internal(
                "Corrupt car row",
                json!({ "id": row.id, "reason": e.to_string() }),
            )
        })?;

        Ok(Car {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
            price: row.price,
            mileage: row.mileage,
            color: row.color,
            interior_color: row.interior_color,
            fuel_type: row.fuel_type,
            transmission: row.transmission,
            drivetrain: row.drivetrain,
            body_style: row.body_style,
            engine: row.engine,
            trim: row.trim,
            condition: row.condition,
            status,
            number_of_seats: row.number_of_seats,
            number_of_doors: row.number_of_doors,
            mpg_city: row.mpg_city,
            mpg_highway: row.mpg_highway,
            safety_rating: row.safety_rating,
            dealer_rating: row.dealer_rating,
            days_on_market: row.days_on_market,
            vehicle_history: row.vehicle_history,
            financing: row.financing,
            images: row.images,
            description: row.description,
            vin: row.vin,
            features: row.features,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL repository for the vehicle inventory.
pub struct PgCarRepository {
    pool: Arc<PgPool>,
}

impl PgCarRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn list_all(&self) -> Result<Vec<Car>, AppError> {
        let rows: Vec<CarRow> =
            sqlx::query_as(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id"))
                .fetch_all(self.pool.as_ref())
                .await?;

        rows.into_iter().map(Car::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let row: Option<CarRow> =
            sqlx::query_as(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        row.map(Car::try_from).transpose()
    }

    async fn create(&self, c: NewCar) -> Result<Car, AppError> {
        let row: CarRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO cars (
                make, model, year, price, mileage, color, interior_color, fuel_type,
                transmission, drivetrain, body_style, engine, trim, condition, status,
                number_of_seats, number_of_doors, mpg_city, mpg_highway, safety_rating,
                dealer_rating, days_on_market, vehicle_history, financing, images,
                description, vin, features
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(c.make)
        .bind(c.model)
        .bind(c.year)
        .bind(c.price)
        .bind(c.mileage)
        .bind(c.color)
        .bind(c.interior_color)
        .bind(c.fuel_type)
        .bind(c.transmission)
        .bind(c.drivetrain)
        .bind(c.body_style)
        .bind(c.engine)
        .bind(c.trim)
        .bind(c.condition)
        .bind(c.status.as_str())
        .bind(c.number_of_seats)
        .bind(c.number_of_doors)
        .bind(c.mpg_city)
        .bind(c.mpg_highway)
        .bind(c.safety_rating)
        .bind(c.dealer_rating)
        .bind(c.days_on_market)
        .bind(c.vehicle_history)
        .bind(c.financing)
        .bind(c.images)
        .bind(c.description)
        .bind(c.vin)
        .bind(c.features)
        .fetch_one(self.pool.as_ref())
        .await?;

        Car::try_from(row)
    }

    async fn update(&self, c: Car) -> Result<Car, AppError> {
        let id = c.id;
        let row: Option<CarRow> = sqlx::query_as(&format!(
            r#"
            UPDATE cars SET
                make = $2, model = $3, year = $4, price = $5, mileage = $6, color = $7,
                interior_color = $8, fuel_type = $9, transmission = $10, drivetrain = $11,
                body_style = $12, engine = $13, trim = $14, condition = $15, status = $16,
                number_of_seats = $17, number_of_doors = $18, mpg_city = $19,
                mpg_highway = $20, safety_rating = $21, dealer_rating = $22,
                days_on_market = $23, vehicle_history = $24, financing = $25, images = $26,
                description = $27, vin = $28, features = $29
            WHERE id = $1
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(c.id)
        .bind(c.make)
        .bind(c.model)
        .bind(c.year)
        .bind(c.price)
        .bind(c.mileage)
        .bind(c.color)
        .bind(c.interior_color)
        .bind(c.fuel_type)
        .bind(c.transmission)
        .bind(c.drivetrain)
        .bind(c.body_style)
        .bind(c.engine)
        .bind(c.trim)
        .bind(c.condition)
        .bind(c.status.as_str())
        .bind(c.number_of_seats)
        .bind(c.number_of_doors)
        .bind(c.mpg_city)
        .bind(c.mpg_highway)
        .bind(c.safety_rating)
        .bind(c.dealer_rating)
        .bind(c.days_on_market)
        .bind(c.vehicle_history)
        .bind(c.financing)
        .bind(c.images)
        .bind(c.description)
        .bind(c.vin)
        .bind(c.features)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Car::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Car not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
