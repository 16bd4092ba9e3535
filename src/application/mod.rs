//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! caching, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::car_service::CarService`] - Inventory snapshot, search, listing CRUD
//! - [`services::catalog_service::CatalogService`] - Service offerings and testimonials
//! - [`services::booking_service::BookingService`] - Service appointment requests
//! - [`services::contact_service::ContactService`] - Contact form inbox
//! - [`services::auth_service::AuthService`] - Admin login and sessions

pub mod services;
