//! Utility functions shared by services, handlers, and the admin CLI.
//!
//! - [`image_url`] - Validation of listing and service image references
//! - [`secrets`] - Session token, salt, and recovery code generation

pub mod image_url;
pub mod secrets;
