//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, BookingService, CarService, CatalogService, ContactService,
};
use crate::infrastructure::cache::CacheService;

/// Cheaply cloneable handle to the application services.
///
/// Services own their repositories as trait objects, so the same state type
/// serves production (PostgreSQL) and tests (in-memory fixtures).
#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    pub catalog_service: Arc<CatalogService>,
    pub booking_service: Arc<BookingService>,
    pub contact_service: Arc<ContactService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
}
