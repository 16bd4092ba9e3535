//! Car entity representing a vehicle in the dealership inventory.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::InvalidInput;

/// Sales status of a listed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Available,
    Pending,
    Sold,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "sold" => Ok(Self::Sold),
            other => Err(InvalidInput::new(
                "status",
                format!("unknown car status '{other}'"),
            )),
        }
    }
}

/// A vehicle listing.
///
/// Identity is the integer `id`. Listings are changed only through the admin
/// API; search and payment estimation never mutate them.
///
/// Serializes with camelCase keys and `price`/ratings as decimal strings, which
/// is both the public API shape and the cache encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: i32,
    pub color: String,
    pub interior_color: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
    pub engine: Option<String>,
    pub trim: Option<String>,
    pub condition: String,
    pub status: CarStatus,
    pub number_of_seats: Option<i32>,
    pub number_of_doors: Option<i32>,
    pub mpg_city: Option<i32>,
    pub mpg_highway: Option<i32>,
    pub safety_rating: Option<Decimal>,
    pub dealer_rating: Option<Decimal>,
    pub days_on_market: Option<i32>,
    pub vehicle_history: Option<String>,
    pub financing: bool,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub vin: Option<String>,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Fills `days_on_market` from `created_at` when no value was stored.
    ///
    /// A stored value is an externally supplied figure (e.g. carried over from
    /// a previous listing) and always wins.
    pub fn derive_days_on_market(&mut self, now: DateTime<Utc>) {
        if self.days_on_market.is_none() {
            let days = (now - self.created_at).num_days().max(0);
            self.days_on_market = Some(i32::try_from(days).unwrap_or(i32::MAX));
        }
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: CarPatch) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }

        set!(
            make,
            model,
            year,
            price,
            mileage,
            color,
            interior_color,
            fuel_type,
            transmission,
            drivetrain,
            body_style,
            engine,
            trim,
            condition,
            status,
            number_of_seats,
            number_of_doors,
            mpg_city,
            mpg_highway,
            safety_rating,
            dealer_rating,
            days_on_market,
            vehicle_history,
            financing,
            images,
            description,
            vin,
            features,
        );
    }
}

/// Input data for listing a new vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: i32,
    pub color: String,
    pub interior_color: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
    pub engine: Option<String>,
    pub trim: Option<String>,
    pub condition: String,
    pub status: CarStatus,
    pub number_of_seats: Option<i32>,
    pub number_of_doors: Option<i32>,
    pub mpg_city: Option<i32>,
    pub mpg_highway: Option<i32>,
    pub safety_rating: Option<Decimal>,
    pub dealer_rating: Option<Decimal>,
    pub days_on_market: Option<i32>,
    pub vehicle_history: Option<String>,
    pub financing: bool,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub vin: Option<String>,
    pub features: Vec<String>,
}

/// Partial update for an existing listing.
///
/// `None` leaves a field unchanged. For nullable columns, `Some(None)` clears
/// the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub interior_color: Option<Option<String>>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<Option<String>>,
    pub body_style: Option<Option<String>>,
    pub engine: Option<Option<String>>,
    pub trim: Option<Option<String>>,
    pub condition: Option<String>,
    pub status: Option<CarStatus>,
    pub number_of_seats: Option<Option<i32>>,
    pub number_of_doors: Option<Option<i32>>,
    pub mpg_city: Option<Option<i32>>,
    pub mpg_highway: Option<Option<i32>>,
    pub safety_rating: Option<Option<Decimal>>,
    pub dealer_rating: Option<Option<Decimal>>,
    pub days_on_market: Option<Option<i32>>,
    pub vehicle_history: Option<Option<String>>,
    pub financing: Option<bool>,
    pub images: Option<Vec<String>>,
    pub description: Option<Option<String>>,
    pub vin: Option<Option<String>>,
    pub features: Option<Vec<String>>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// A fully populated 2020 Toyota Camry; tests override what they need.
    pub fn car(id: i64) -> Car {
        Car {
            id,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            price: Decimal::new(18_500_00, 2),
            mileage: 42_000,
            color: "Silver".to_string(),
            interior_color: Some("Black".to_string()),
            fuel_type: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            drivetrain: Some("FWD".to_string()),
            body_style: Some("Sedan".to_string()),
            engine: Some("2.5L I4".to_string()),
            trim: Some("SE".to_string()),
            condition: "used".to_string(),
            status: CarStatus::Available,
            number_of_seats: Some(5),
            number_of_doors: Some(4),
            mpg_city: Some(28),
            mpg_highway: Some(39),
            safety_rating: Some(Decimal::new(50, 1)),
            dealer_rating: Some(Decimal::new(45, 1)),
            days_on_market: Some(10),
            vehicle_history: Some("Clean".to_string()),
            financing: true,
            images: vec!["/images/camry-front.jpg".to_string()],
            description: None,
            vin: None,
            features: vec!["Bluetooth".to_string(), "Backup Camera".to_string()],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::car;
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [CarStatus::Available, CarStatus::Pending, CarStatus::Sold] {
            assert_eq!(status.as_str().parse::<CarStatus>().unwrap(), status);
        }
        assert!("reserved".parse::<CarStatus>().is_err());
    }

    #[test]
    fn test_derive_days_on_market_from_created_at() {
        let mut listing = car(1);
        listing.days_on_market = None;

        listing.derive_days_on_market(listing.created_at + Duration::days(17) + Duration::hours(3));

        assert_eq!(listing.days_on_market, Some(17));
    }

    #[test]
    fn test_stored_days_on_market_wins() {
        let mut listing = car(1);
        listing.days_on_market = Some(3);

        listing.derive_days_on_market(listing.created_at + Duration::days(90));

        assert_eq!(listing.days_on_market, Some(3));
    }

    #[test]
    fn test_apply_patch_sets_and_clears() {
        let mut listing = car(1);

        listing.apply(CarPatch {
            price: Some(Decimal::new(17_999_00, 2)),
            status: Some(CarStatus::Pending),
            trim: Some(None),
            mpg_city: Some(Some(30)),
            ..Default::default()
        });

        assert_eq!(listing.price, Decimal::new(17_999_00, 2));
        assert_eq!(listing.status, CarStatus::Pending);
        assert_eq!(listing.trim, None);
        assert_eq!(listing.mpg_city, Some(30));
        assert_eq!(listing.make, "Toyota");
    }

    #[test]
    fn test_serializes_price_as_decimal_string() {
        let json = serde_json::to_value(car(7)).unwrap();

        assert_eq!(json["price"], "18500.00");
        assert_eq!(json["fuelType"], "Gasoline");
        assert_eq!(json["status"], "available");
    }
}
