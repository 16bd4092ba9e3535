//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names, and validator for input validation.

pub mod admin;
pub mod bookings;
pub mod cars;
pub mod catalog;
pub mod contact;
pub mod health;
pub mod payment;
