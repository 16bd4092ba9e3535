//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CarRepository`] - Vehicle inventory CRUD
//! - [`OfferingRepository`] - Service department catalog
//! - [`TestimonialRepository`] - Customer reviews and moderation
//! - [`BookingRepository`] - Service appointment requests
//! - [`ContactRepository`] - Contact form messages
//! - [`AdminRepository`] - Admin credentials and sessions

pub mod admin_repository;
pub mod booking_repository;
pub mod car_repository;
pub mod contact_repository;
pub mod offering_repository;
pub mod testimonial_repository;

pub use admin_repository::AdminRepository;
pub use booking_repository::BookingRepository;
pub use car_repository::CarRepository;
pub use contact_repository::ContactRepository;
pub use offering_repository::OfferingRepository;
pub use testimonial_repository::TestimonialRepository;

#[cfg(test)]
pub use admin_repository::MockAdminRepository;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use car_repository::MockCarRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
#[cfg(test)]
pub use offering_repository::MockOfferingRepository;
#[cfg(test)]
pub use testimonial_repository::MockTestimonialRepository;
