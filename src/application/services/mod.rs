//! Business logic services for the application layer.

pub mod auth_service;
pub mod booking_service;
pub mod car_service;
pub mod catalog_service;
pub mod contact_service;

pub use auth_service::{AuthService, IssuedSession, Recovery};
pub use booking_service::BookingService;
pub use car_service::CarService;
pub use catalog_service::CatalogService;
pub use contact_service::ContactService;
