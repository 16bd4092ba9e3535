//! Handlers for inventory search and listing management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::cars::{CarsQuery, CarsResponse, CreateCarRequest, UpdateCarRequest};
use crate::domain::entities::Car;
use crate::domain::search::CarFilters;
use crate::error::AppError;
use crate::state::AppState;

/// Searches the inventory.
///
/// # Endpoint
///
/// `GET /api/cars`
///
/// # Query Parameters
///
/// Every filter is optional. Multi-valued filters are comma-separated.
///
/// - `make`, `fuelType`, `transmission`, `drivetrain`, `bodyStyle`, `color`,
///   `interiorColor`, `condition`, `vehicleHistory`, `features`
/// - `model`, `trim`, `engine` (fuzzy)
/// - `minPrice`, `maxPrice`, `minYear`, `maxYear`, `minMileage`, `maxMileage`,
///   `minMpgCity`, `maxMpgCity`, `minSafetyRating`, `minDealerRating`,
///   `maxDaysOnMarket`
/// - `numberOfSeats`, `numberOfDoors`, `financing`, `status`
/// - `sortBy`: `price_asc`, `price_desc`, `year_desc`, `mileage_asc`,
///   `newest`, `safety_rating`, `dealer_rating`
/// - `page` (default 1), `limit` (default 12, max 100)
///
/// # Response
///
/// `{"cars": [...], "total": 37}` where `total` counts every match before
/// pagination.
pub async fn list_cars_handler(
    State(state): State<AppState>,
    Query(query): Query<CarsQuery>,
) -> Result<Json<CarsResponse>, AppError> {
    query.validate()?;

    let filters = CarFilters::from(query);
    let page = state.car_service.search(&filters).await?;

    Ok(Json(page.into()))
}

/// `GET /api/cars/{id}`
pub async fn get_car_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Car>, AppError> {
    Ok(Json(state.car_service.get(id).await?))
}

/// Lists a new vehicle.
///
/// # Endpoint
///
/// `POST /api/cars` (admin)
///
/// # Errors
///
/// Returns 400 for invalid fields or image references, 409 for a duplicate VIN.
pub async fn create_car_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    payload.validate()?;

    let car = state.car_service.create(payload.into_new_car()?).await?;

    Ok((StatusCode::CREATED, Json(car)))
}

/// Partially updates a listing.
///
/// # Endpoint
///
/// `PATCH /api/cars/{id}` (admin)
pub async fn update_car_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCarRequest>,
) -> Result<Json<Car>, AppError> {
    payload.validate()?;

    let car = state.car_service.update(id, payload.into_patch()?).await?;

    Ok(Json(car))
}

/// `DELETE /api/cars/{id}` (admin)
pub async fn delete_car_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.car_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
