//! Service department catalog and customer testimonials.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{
    NewServiceOffering, NewTestimonial, ServiceOffering, ServiceOfferingPatch, Testimonial,
};
use crate::domain::repositories::{OfferingRepository, TestimonialRepository};
use crate::error::AppError;

/// Lowest and highest accepted star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Service for the public-facing catalog content.
pub struct CatalogService {
    offerings: Arc<dyn OfferingRepository>,
    testimonials: Arc<dyn TestimonialRepository>,
}

impl CatalogService {
    pub fn new(
        offerings: Arc<dyn OfferingRepository>,
        testimonials: Arc<dyn TestimonialRepository>,
    ) -> Self {
        Self {
            offerings,
            testimonials,
        }
    }

    /// Lists service offerings. Visitors only see active ones.
    pub async fn list_offerings(
        &self,
        include_hidden: bool,
    ) -> Result<Vec<ServiceOffering>, AppError> {
        self.offerings.list(!include_hidden).await
    }

    /// Fetches one offering.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if it does not exist, or if it is
    /// inactive and `include_hidden` is false.
    pub async fn get_offering(
        &self,
        id: i64,
        include_hidden: bool,
    ) -> Result<ServiceOffering, AppError> {
        self.offerings
            .find_by_id(id)
            .await?
            .filter(|o| include_hidden || o.is_active)
            .ok_or_else(|| offering_not_found(id))
    }

    pub async fn create_offering(
        &self,
        offering: NewServiceOffering,
    ) -> Result<ServiceOffering, AppError> {
        let offering = self.offerings.create(offering).await?;
        info!(offering_id = offering.id, name = %offering.name, "Service offering created");
        Ok(offering)
    }

    pub async fn update_offering(
        &self,
        id: i64,
        patch: ServiceOfferingPatch,
    ) -> Result<ServiceOffering, AppError> {
        let mut offering = self.get_offering(id, true).await?;
        offering.apply(patch);
        self.offerings.update(offering).await
    }

    pub async fn delete_offering(&self, id: i64) -> Result<(), AppError> {
        if !self.offerings.delete(id).await? {
            return Err(offering_not_found(id));
        }
        info!(offering_id = id, "Service offering deleted");
        Ok(())
    }

    /// Lists testimonials, optionally only the approved ones.
    pub async fn list_testimonials(
        &self,
        approved: Option<bool>,
    ) -> Result<Vec<Testimonial>, AppError> {
        self.testimonials.list(approved).await
    }

    /// Stores a visitor's testimonial for moderation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the rating is outside 1 to 5.
    pub async fn submit_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, AppError> {
        if !RATING_RANGE.contains(&testimonial.rating) {
            return Err(AppError::bad_request(
                "Rating must be between 1 and 5",
                json!({ "rating": testimonial.rating }),
            ));
        }

        let testimonial = self.testimonials.create(testimonial).await?;
        info!(testimonial_id = testimonial.id, "Testimonial submitted for review");
        Ok(testimonial)
    }

    pub async fn set_testimonial_approved(
        &self,
        id: i64,
        approved: bool,
    ) -> Result<Testimonial, AppError> {
        let testimonial = self
            .testimonials
            .set_approved(id, approved)
            .await?
            .ok_or_else(|| testimonial_not_found(id))?;

        info!(testimonial_id = id, approved, "Testimonial moderated");
        Ok(testimonial)
    }

    pub async fn delete_testimonial(&self, id: i64) -> Result<(), AppError> {
        if !self.testimonials.delete(id).await? {
            return Err(testimonial_not_found(id));
        }
        Ok(())
    }
}

fn offering_not_found(id: i64) -> AppError {
    AppError::not_found("Service not found", json!({ "id": id }))
}

fn testimonial_not_found(id: i64) -> AppError {
    AppError::not_found("Testimonial not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockOfferingRepository, MockTestimonialRepository};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn offering(id: i64, is_active: bool) -> ServiceOffering {
        ServiceOffering {
            id,
            name: "Brake Inspection".to_string(),
            description: "Pads, rotors and fluid check".to_string(),
            starting_price: Decimal::new(8900, 2),
            category: "maintenance".to_string(),
            icon: "disc".to_string(),
            image: None,
            image_url: None,
            features: vec![],
            duration: Some("1 hour".to_string()),
            is_active,
        }
    }

    fn service(
        offerings: MockOfferingRepository,
        testimonials: MockTestimonialRepository,
    ) -> CatalogService {
        CatalogService::new(Arc::new(offerings), Arc::new(testimonials))
    }

    #[tokio::test]
    async fn test_public_listing_requests_active_only() {
        let mut offerings = MockOfferingRepository::new();
        offerings
            .expect_list()
            .withf(|active_only| *active_only)
            .times(1)
            .returning(|_| Ok(vec![offering(1, true)]));

        let listed = service(offerings, MockTestimonialRepository::new())
            .list_offerings(false)
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_hidden_offering_is_not_found_publicly() {
        let mut offerings = MockOfferingRepository::new();
        offerings
            .expect_find_by_id()
            .returning(|id| Ok(Some(offering(id, false))));

        let svc = service(offerings, MockTestimonialRepository::new());

        assert!(matches!(
            svc.get_offering(3, false).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert_eq!(svc.get_offering(3, true).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let mut testimonials = MockTestimonialRepository::new();
        testimonials.expect_create().never();

        let err = service(MockOfferingRepository::new(), testimonials)
            .submit_testimonial(NewTestimonial {
                name: "Dana".to_string(),
                role: "Customer".to_string(),
                rating: 6,
                comment: "Great".to_string(),
                image: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_approve_missing_testimonial() {
        let mut testimonials = MockTestimonialRepository::new();
        testimonials.expect_set_approved().returning(|_, _| Ok(None));

        let err = service(MockOfferingRepository::new(), testimonials)
            .set_testimonial_approved(7, true)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_approve_testimonial() {
        let mut testimonials = MockTestimonialRepository::new();
        testimonials.expect_set_approved().returning(|id, approved| {
            Ok(Some(Testimonial {
                id,
                name: "Dana".to_string(),
                role: "Customer".to_string(),
                rating: 5,
                comment: "Smooth purchase".to_string(),
                image: None,
                is_approved: approved,
                created_at: Utc::now(),
            }))
        });

        let approved = service(MockOfferingRepository::new(), testimonials)
            .set_testimonial_approved(7, true)
            .await
            .unwrap();

        assert!(approved.is_approved);
    }
}
