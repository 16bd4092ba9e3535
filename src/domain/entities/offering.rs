//! Service offering entity (maintenance, detailing, repairs).

use rust_decimal::Decimal;

/// A service the dealership's shop offers.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub starting_price: Decimal,
    pub category: String,
    pub icon: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    /// Free-form estimate such as `"1-2 hours"`.
    pub duration: Option<String>,
    pub is_active: bool,
}

/// Input data for creating a service offering.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceOffering {
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

/// Partial update for a service offering. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOfferingPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starting_price: Option<Decimal>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub image: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    pub duration: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ServiceOffering {
    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: ServiceOfferingPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(starting_price) = patch.starting_price {
            self.starting_price = starting_price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(features) = patch.features {
            self.features = features;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}
