//! Inventory service: cached listing snapshot, search, and admin CRUD.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Car, CarPatch, NewCar};
use crate::domain::repositories::CarRepository;
use crate::domain::search::{self, CarFilters, CarPage};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Cache key of the serialized inventory snapshot.
pub const INVENTORY_CACHE_KEY: &str = "cars:inventory";

/// Service for browsing and maintaining the vehicle inventory.
///
/// Searches run in memory over a snapshot of all listings. The snapshot is
/// cached as JSON and invalidated on every write, so a stale read lasts at
/// most one TTL after an out-of-band database change.
pub struct CarService {
    repository: Arc<dyn CarRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Option<u64>,
}

impl CarService {
    pub fn new(
        repository: Arc<dyn CarRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Option<u64>,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    /// Loads every listing, from cache when possible, with days-on-market filled in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Cache failures are
    /// logged and fall through to the database.
    pub async fn inventory(&self) -> Result<Vec<Car>, AppError> {
        let mut cars = match self.cached_inventory().await {
            Some(cars) => cars,
            None => {
                let cars = self.repository.list_all().await?;
                self.store_inventory(&cars).await;
                cars
            }
        };

        let now = Utc::now();
        for car in &mut cars {
            car.derive_days_on_market(now);
        }

        Ok(cars)
    }

    async fn cached_inventory(&self) -> Option<Vec<Car>> {
        let payload = match self.cache.get(INVENTORY_CACHE_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Inventory cache lookup failed");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(cars) => Some(cars),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable inventory snapshot");
                None
            }
        }
    }

    async fn store_inventory(&self, cars: &[Car]) {
        match serde_json::to_string(cars) {
            Ok(payload) => {
                if let Err(e) = self
                    .cache
                    .set(INVENTORY_CACHE_KEY, &payload, self.cache_ttl)
                    .await
                {
                    warn!(error = %e, "Failed to cache inventory snapshot");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize inventory snapshot"),
        }
    }

    async fn invalidate_inventory(&self) {
        if let Err(e) = self.cache.invalidate(INVENTORY_CACHE_KEY).await {
            warn!(error = %e, "Failed to invalidate inventory snapshot");
        }
    }

    /// Filters, sorts, and paginates the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for invalid paging, or
    /// [`AppError::Internal`] if the inventory cannot be loaded.
    pub async fn search(&self, filters: &CarFilters) -> Result<CarPage, AppError> {
        let cars = self.inventory().await?;
        let page = search::search(&cars, filters)?;

        metrics::counter!("car_searches_total").increment(1);
        debug!(
            total = page.total,
            returned = page.cars.len(),
            page = filters.page,
            "Car search"
        );

        Ok(page)
    }

    /// Fetches one listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has this id.
    pub async fn get(&self, id: i64) -> Result<Car, AppError> {
        let mut car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| car_not_found(id))?;

        car.derive_days_on_market(Utc::now());
        Ok(car)
    }

    /// Lists a new vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the VIN is already listed.
    pub async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let car = self.repository.create(new_car).await?;
        self.invalidate_inventory().await;

        info!(car_id = car.id, make = %car.make, model = %car.model, "Car listed");
        Ok(car)
    }

    /// Applies a partial update to a listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has this id.
    pub async fn update(&self, id: i64, patch: CarPatch) -> Result<Car, AppError> {
        let mut car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| car_not_found(id))?;

        car.apply(patch);
        let car = self.repository.update(car).await?;
        self.invalidate_inventory().await;

        info!(car_id = id, status = %car.status, "Car updated");
        Ok(car)
    }

    /// Removes a listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(car_not_found(id));
        }
        self.invalidate_inventory().await;

        info!(car_id = id, "Car deleted");
        Ok(())
    }

    /// Number of listings. Used by the health check.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn car_not_found(id: i64) -> AppError {
    AppError::not_found("Car not found", json!({ "id": id }))
}
