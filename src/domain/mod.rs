//! Domain layer containing business entities and logic.
//!
//! The two dealership engines live here as pure functions with no I/O:
//!
//! - [`finance`] - Loan payment estimation and amortization schedules
//! - [`search`] - Inventory filtering, sorting, and pagination
//!
//! Alongside them:
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - The engines only ever fail with [`InvalidInput`]

pub mod entities;
pub mod finance;
mod invalid_input;
pub mod repositories;
pub mod search;

pub use invalid_input::InvalidInput;
