//! DTOs for inventory search and listing management.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, StringWithSeparator, formats::CommaSeparator, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::{Car, CarPatch, CarStatus, NewCar};
use crate::domain::search::{CarFilters, CarPage, DEFAULT_LIMIT, DEFAULT_PAGE, SortBy};
use crate::error::AppError;
use crate::utils::image_url::normalize_image_urls;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

type CommaList = StringWithSeparator<CommaSeparator, String>;

/// Query parameters for `GET /api/cars`.
///
/// Multi-valued filters are comma-separated (`fuelType=Gasoline,Hybrid`).
/// Numbers and enums are parsed from their string form so that a malformed
/// value is rejected instead of silently ignored.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarsQuery {
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub make: Option<Vec<String>>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub engine: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_year: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_year: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_mileage: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_mileage: Option<i32>,

    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub fuel_type: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub transmission: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub drivetrain: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub body_style: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub color: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub interior_color: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub condition: Option<Vec<String>>,
    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub vehicle_history: Option<Vec<String>>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub number_of_seats: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub number_of_doors: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_mpg_city: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_mpg_city: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_safety_rating: Option<Decimal>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_dealer_rating: Option<Decimal>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_days_on_market: Option<i32>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub financing: Option<bool>,

    #[serde_as(as = "Option<CommaList>")]
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub status: Option<CarStatus>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub sort_by: Option<SortBy>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(max = 100, message = "must be at most 100"))]
    pub limit: Option<i64>,
}

/// Drops blank entries left by inputs like `color=Red,,Blue` or `color=`.
fn list(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<CarsQuery> for CarFilters {
    fn from(q: CarsQuery) -> Self {
        CarFilters {
            make: list(q.make),
            model: text(q.model),
            trim: text(q.trim),
            engine: text(q.engine),
            min_price: q.min_price,
            max_price: q.max_price,
            min_year: q.min_year,
            max_year: q.max_year,
            min_mileage: q.min_mileage,
            max_mileage: q.max_mileage,
            fuel_type: list(q.fuel_type),
            transmission: list(q.transmission),
            drivetrain: list(q.drivetrain),
            body_style: list(q.body_style),
            color: list(q.color),
            interior_color: list(q.interior_color),
            condition: list(q.condition),
            vehicle_history: list(q.vehicle_history),
            number_of_seats: q.number_of_seats,
            number_of_doors: q.number_of_doors,
            min_mpg_city: q.min_mpg_city,
            max_mpg_city: q.max_mpg_city,
            min_safety_rating: q.min_safety_rating,
            min_dealer_rating: q.min_dealer_rating,
            max_days_on_market: q.max_days_on_market,
            financing: q.financing,
            features: list(q.features),
            status: q.status,
            sort_by: q.sort_by,
            page: q.page.unwrap_or(DEFAULT_PAGE),
            limit: q.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// One page of search results.
#[derive(Debug, Serialize)]
pub struct CarsResponse {
    pub cars: Vec<Car>,
    pub total: usize,
}

impl From<CarPage> for CarsResponse {
    fn from(page: CarPage) -> Self {
        CarsResponse {
            cars: page.cars,
            total: page.total,
        }
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    Ok(())
}

fn rating(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::from(5) {
        return Err(ValidationError::new("range").with_message("must be between 0 and 5".into()));
    }
    Ok(())
}

fn normalize_images(images: &[String]) -> Result<Vec<String>, AppError> {
    normalize_image_urls(images).map_err(|(index, e)| {
        AppError::bad_request(
            "Invalid image reference",
            json!({ "field": "images", "index": index, "reason": e.to_string() }),
        )
    })
}

/// Request body for `POST /api/cars`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    pub make: String,
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    pub model: String,
    #[validate(range(min = 1886, max = 2100, message = "must be a plausible model year"))]
    pub year: i32,
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub mileage: i32,
    #[validate(length(min = 1, max = 32))]
    pub color: String,
    pub interior_color: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub fuel_type: String,
    #[validate(length(min = 1, max = 32))]
    pub transmission: String,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
    pub engine: Option<String>,
    pub trim: Option<String>,
    #[serde(default = "default_condition")]
    #[validate(length(min = 1, max = 32))]
    pub condition: String,
    #[serde(default = "default_status")]
    pub status: CarStatus,
    #[validate(range(min = 1, max = 15))]
    pub number_of_seats: Option<i32>,
    #[validate(range(min = 1, max = 6))]
    pub number_of_doors: Option<i32>,
    #[validate(range(min = 0))]
    pub mpg_city: Option<i32>,
    #[validate(range(min = 0))]
    pub mpg_highway: Option<i32>,
    #[validate(custom(function = "rating"))]
    pub safety_rating: Option<Decimal>,
    #[validate(custom(function = "rating"))]
    pub dealer_rating: Option<Decimal>,
    #[validate(range(min = 0))]
    pub days_on_market: Option<i32>,
    pub vehicle_history: Option<String>,
    #[serde(default = "default_financing")]
    pub financing: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
    #[validate(length(equal = 17, message = "must be 17 characters"))]
    pub vin: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_status() -> CarStatus {
    CarStatus::Available
}

fn default_condition() -> String {
    "used".to_string()
}

fn default_financing() -> bool {
    true
}

impl CreateCarRequest {
    /// Converts into a domain [`NewCar`], normalizing image references.
    pub fn into_new_car(self) -> Result<NewCar, AppError> {
        Ok(NewCar {
            images: normalize_images(&self.images)?,
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            color: self.color,
            interior_color: self.interior_color,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            drivetrain: self.drivetrain,
            body_style: self.body_style,
            engine: self.engine,
            trim: self.trim,
            condition: self.condition,
            status: self.status,
            number_of_seats: self.number_of_seats,
            number_of_doors: self.number_of_doors,
            mpg_city: self.mpg_city,
            mpg_highway: self.mpg_highway,
            safety_rating: self.safety_rating,
            dealer_rating: self.dealer_rating,
            days_on_market: self.days_on_market,
            vehicle_history: self.vehicle_history,
            financing: self.financing,
            description: self.description,
            vin: self.vin,
            features: self.features,
        })
    }
}

/// Request body for `PATCH /api/cars/{id}`.
///
/// Omitted fields are left unchanged. For nullable fields an explicit `null`
/// clears the stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 64))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub model: Option<String>,
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
    pub color: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub interior_color: Option<Option<String>>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub drivetrain: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub body_style: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub engine: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub trim: Option<Option<String>>,
    pub condition: Option<String>,
    pub status: Option<CarStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub number_of_seats: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub number_of_doors: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub mpg_city: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub mpg_highway: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub safety_rating: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub dealer_rating: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub days_on_market: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub vehicle_history: Option<Option<String>>,
    pub financing: Option<bool>,
    pub images: Option<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub vin: Option<Option<String>>,
    pub features: Option<Vec<String>>,
}

impl UpdateCarRequest {
    /// Validates the nested optional ratings and converts into a [`CarPatch`].
    pub fn into_patch(self) -> Result<CarPatch, AppError> {
        for (field, value) in [
            ("safetyRating", self.safety_rating.flatten()),
            ("dealerRating", self.dealer_rating.flatten()),
        ] {
            if let Some(value) = value
                && rating(&value).is_err()
            {
                return Err(AppError::bad_request(
                    "Validation failed",
                    json!({ "fields": { field: ["must be between 0 and 5"] } }),
                ));
            }
        }

        let images = self.images.as_deref().map(normalize_images).transpose()?;

        Ok(CarPatch {
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            color: self.color,
            interior_color: self.interior_color,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            drivetrain: self.drivetrain,
            body_style: self.body_style,
            engine: self.engine,
            trim: self.trim,
            condition: self.condition,
            status: self.status,
            number_of_seats: self.number_of_seats,
            number_of_doors: self.number_of_doors,
            mpg_city: self.mpg_city,
            mpg_highway: self.mpg_highway,
            safety_rating: self.safety_rating,
            dealer_rating: self.dealer_rating,
            days_on_market: self.days_on_market,
            vehicle_history: self.vehicle_history,
            financing: self.financing,
            images,
            description: self.description,
            vin: self.vin,
            features: self.features,
        })
    }
}
