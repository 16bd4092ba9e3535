//! Core domain entities representing the dealership's data model.
//!
//! Entities are plain data structures. Creation inputs use separate `New*`
//! structs and partial updates use `*Patch` structs whose `None` fields are
//! left unchanged.
//!
//! # Entity Types
//!
//! - [`Car`] - A vehicle listing
//! - [`ServiceOffering`] - A shop service with a starting price
//! - [`Testimonial`] - A customer review
//! - [`ServiceBooking`] - An appointment request
//! - [`ContactMessage`] - A contact form submission
//! - [`AdminCredentials`] / [`AdminSession`] - Admin area access

pub mod admin;
pub mod booking;
pub mod car;
pub mod contact;
pub mod offering;
pub mod testimonial;

pub use admin::{AdminCredentials, AdminSession};
pub use booking::{BookingStatus, NewServiceBooking, ServiceBooking};
pub use car::{Car, CarPatch, CarStatus, NewCar};
pub use contact::{ContactMessage, MessageStatus, NewContactMessage};
pub use offering::{NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
pub use testimonial::{NewTestimonial, Testimonial};
