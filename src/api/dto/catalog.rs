//! DTOs for service offerings and testimonials.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::{
    NewServiceOffering, NewTestimonial, ServiceOffering, ServiceOfferingPatch, Testimonial,
};
use crate::error::AppError;
use crate::utils::image_url::normalize_image_url;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub starting_price: Decimal,
    pub category: String,
    pub icon: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub is_active: bool,
}

impl From<ServiceOffering> for OfferingResponse {
    fn from(o: ServiceOffering) -> Self {
        OfferingResponse {
            id: o.id,
            name: o.name,
            description: o.description,
            starting_price: o.starting_price,
            category: o.category,
            icon: o.icon,
            image: o.image,
            image_url: o.image_url,
            features: o.features,
            duration: o.duration,
            is_active: o.is_active,
        }
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    Ok(())
}

fn image_ref(field: &'static str, value: Option<String>) -> Result<Option<String>, AppError> {
    value
        .map(|v| {
            normalize_image_url(&v).map_err(|e| {
                AppError::bad_request(
                    "Invalid image reference",
                    json!({ "field": field, "reason": e.to_string() }),
                )
            })
        })
        .transpose()
}

/// Request body for `POST /api/services`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferingRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1 to 120 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(custom(function = "non_negative"))]
    pub starting_price: Decimal,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[validate(length(min = 1, max = 64))]
    pub icon: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub duration: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateOfferingRequest {
    pub fn into_new_offering(self) -> Result<NewServiceOffering, AppError> {
        Ok(NewServiceOffering {
            image: image_ref("image", self.image)?,
            image_url: image_ref("imageUrl", self.image_url)?,
            name: self.name,
            description: self.description,
            starting_price: self.starting_price,
            category: self.category,
            icon: self.icon,
            features: self.features,
            duration: self.duration,
            is_active: self.is_active,
        })
    }
}

/// Request body for `PATCH /api/services/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferingRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub starting_price: Option<Decimal>,
    pub category: Option<String>,
    pub icon: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_url: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub duration: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateOfferingRequest {
    pub fn into_patch(self) -> Result<ServiceOfferingPatch, AppError> {
        let image = match self.image {
            Some(value) => Some(image_ref("image", value)?),
            None => None,
        };
        let image_url = match self.image_url {
            Some(value) => Some(image_ref("imageUrl", value)?),
            None => None,
        };

        Ok(ServiceOfferingPatch {
            name: self.name,
            description: self.description,
            starting_price: self.starting_price,
            category: self.category,
            icon: self.icon,
            image,
            image_url,
            features: self.features,
            duration: self.duration,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub rating: i32,
    pub comment: String,
    pub image: Option<String>,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        TestimonialResponse {
            id: t.id,
            name: t.name,
            role: t.role,
            rating: t.rating,
            comment: t.comment,
            image: t.image,
            is_approved: t.is_approved,
            created_at: t.created_at,
        }
    }
}

/// Query parameters for `GET /api/testimonials`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub approved: Option<bool>,
}

/// Request body for `POST /api/testimonials`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub role: String,
    pub rating: i32,
    #[validate(length(min = 1, max = 2000, message = "must be 1 to 2000 characters"))]
    pub comment: String,
    pub image: Option<String>,
}

impl CreateTestimonialRequest {
    pub fn into_new_testimonial(self) -> Result<NewTestimonial, AppError> {
        Ok(NewTestimonial {
            image: image_ref("image", self.image)?,
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            rating: self.rating,
            comment: self.comment,
        })
    }
}

/// Request body for `PATCH /api/testimonials/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateTestimonialRequest {
    pub is_approved: bool,
}
