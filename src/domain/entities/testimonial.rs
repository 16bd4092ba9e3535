//! Customer testimonial entity.

use chrono::{DateTime, Utc};

/// A customer review shown on the site once approved by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    /// E.g. `"Car Buyer"` or `"Service Customer"`.
    pub role: String,
    /// Star rating, 1 to 5.
    pub rating: i32,
    pub comment: String,
    pub image: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for a testimonial submission.
///
/// Public submissions always start unapproved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTestimonial {
    pub name: String,
    pub role: String,
    pub rating: i32,
    pub comment: String,
    pub image: Option<String>,
}
