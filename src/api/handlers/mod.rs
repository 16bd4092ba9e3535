//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod bookings;
pub mod cars;
pub mod catalog;
pub mod contact;
pub mod health;
pub mod payment;

pub use health::health_handler;
pub use payment::calculate_payment_handler;
