//! Inventory search: filtering, sorting, and pagination over car listings.
//!
//! [`search`] is a pure function over a borrowed slice. The input collection is
//! never reordered or mutated; matches are collected as references, sorted, and
//! only the requested page is cloned out.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::InvalidInput;
use super::entities::{Car, CarStatus};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 12;

/// Sort keys offered to the catalog UI.
///
/// Every key sorts stably and breaks ties by ascending car id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    YearDesc,
    MileageAsc,
    /// Most recently listed first.
    Newest,
    /// Highest safety rating first, unrated last.
    SafetyRating,
    /// Highest dealer rating first, unrated last.
    DealerRating,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::YearDesc => "year_desc",
            Self::MileageAsc => "mileage_asc",
            Self::Newest => "newest",
            Self::SafetyRating => "safety_rating",
            Self::DealerRating => "dealer_rating",
        }
    }

    fn compare(&self, a: &Car, b: &Car) -> Ordering {
        let primary = match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::YearDesc => b.year.cmp(&a.year),
            Self::MileageAsc => a.mileage.cmp(&b.mileage),
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::SafetyRating => descending_nulls_last(a.safety_rating, b.safety_rating),
            Self::DealerRating => descending_nulls_last(a.dealer_rating, b.dealer_rating),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "year_desc" => Ok(Self::YearDesc),
            "mileage_asc" => Ok(Self::MileageAsc),
            "newest" => Ok(Self::Newest),
            "safety_rating" => Ok(Self::SafetyRating),
            "dealer_rating" => Ok(Self::DealerRating),
            other => Err(InvalidInput::new(
                "sortBy",
                format!("unknown sort key '{other}'"),
            )),
        }
    }
}

fn descending_nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Search criteria for the car catalog.
///
/// Every field is optional: `None` bounds and empty sets leave that dimension
/// unconstrained. Built per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CarFilters {
    /// One make is an exact match; several make a membership test.
    pub make: Vec<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub engine: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_mileage: Option<i32>,
    pub max_mileage: Option<i32>,
    pub fuel_type: Vec<String>,
    pub transmission: Vec<String>,
    pub drivetrain: Vec<String>,
    pub body_style: Vec<String>,
    pub color: Vec<String>,
    pub interior_color: Vec<String>,
    pub condition: Vec<String>,
    pub vehicle_history: Vec<String>,
    pub number_of_seats: Option<i32>,
    pub number_of_doors: Option<i32>,
    pub min_mpg_city: Option<i32>,
    pub max_mpg_city: Option<i32>,
    pub min_safety_rating: Option<Decimal>,
    pub min_dealer_rating: Option<Decimal>,
    pub max_days_on_market: Option<i32>,
    pub financing: Option<bool>,
    /// A car must list every one of these features.
    pub features: Vec<String>,
    pub status: Option<CarStatus>,
    pub sort_by: Option<SortBy>,
    /// 1-indexed page number.
    pub page: i64,
    pub limit: i64,
}

impl Default for CarFilters {
    fn default() -> Self {
        Self {
            make: Vec::new(),
            model: None,
            trim: None,
            engine: None,
            min_price: None,
            max_price: None,
            min_year: None,
            max_year: None,
            min_mileage: None,
            max_mileage: None,
            fuel_type: Vec::new(),
            transmission: Vec::new(),
            drivetrain: Vec::new(),
            body_style: Vec::new(),
            color: Vec::new(),
            interior_color: Vec::new(),
            condition: Vec::new(),
            vehicle_history: Vec::new(),
            number_of_seats: None,
            number_of_doors: None,
            min_mpg_city: None,
            max_mpg_city: None,
            min_safety_rating: None,
            min_dealer_rating: None,
            max_days_on_market: None,
            financing: None,
            features: Vec::new(),
            status: None,
            sort_by: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl CarFilters {
    /// Validates paging and returns `(offset, limit)` for slicing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `page < 1` or `limit < 1`.
    pub fn offset_limit(&self) -> Result<(usize, usize), InvalidInput> {
        if self.page < 1 {
            return Err(InvalidInput::new("page", "must be at least 1"));
        }
        if self.limit < 1 {
            return Err(InvalidInput::new("limit", "must be at least 1"));
        }

        let offset = (self.page - 1).saturating_mul(self.limit);
        Ok((
            usize::try_from(offset).unwrap_or(usize::MAX),
            usize::try_from(self.limit).unwrap_or(usize::MAX),
        ))
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            filters: self,
            model: self.model.as_deref().map(normalize),
            trim: self.trim.as_deref().map(normalize),
            engine: self.engine.as_deref().map(normalize),
        }
    }
}

/// Filters with free-text needles normalized once per search.
struct Matcher<'a> {
    filters: &'a CarFilters,
    model: Option<String>,
    trim: Option<String>,
    engine: Option<String>,
}

impl Matcher<'_> {
    fn matches(&self, car: &Car) -> bool {
        let f = self.filters;

        in_set(&f.make, Some(&car.make))
            && fuzzy(self.model.as_deref(), Some(&car.model))
            && fuzzy(self.trim.as_deref(), car.trim.as_deref())
            && fuzzy(self.engine.as_deref(), car.engine.as_deref())
            && within(Some(car.price), f.min_price, f.max_price)
            && within(Some(car.year), f.min_year, f.max_year)
            && within(Some(car.mileage), f.min_mileage, f.max_mileage)
            && within(car.mpg_city, f.min_mpg_city, f.max_mpg_city)
            && within(car.safety_rating, f.min_safety_rating, None)
            && within(car.dealer_rating, f.min_dealer_rating, None)
            && within(car.days_on_market, None, f.max_days_on_market)
            && in_set(&f.fuel_type, Some(&car.fuel_type))
            && in_set(&f.transmission, Some(&car.transmission))
            && in_set(&f.drivetrain, car.drivetrain.as_deref())
            && in_set(&f.body_style, car.body_style.as_deref())
            && in_set(&f.color, Some(&car.color))
            && in_set(&f.interior_color, car.interior_color.as_deref())
            && in_set(&f.condition, Some(&car.condition))
            && in_set(&f.vehicle_history, car.vehicle_history.as_deref())
            && equals(f.number_of_seats, car.number_of_seats)
            && equals(f.number_of_doors, car.number_of_doors)
            && f.financing.is_none_or(|wanted| wanted == car.financing)
            && f.status.is_none_or(|wanted| wanted == car.status)
            && f.features.iter().all(|wanted| car.features.contains(wanted))
    }
}

/// Empty set: unconstrained. Otherwise the value must be present and listed.
fn in_set(set: &[String], value: Option<&str>) -> bool {
    set.is_empty() || value.is_some_and(|v| set.iter().any(|s| s == v))
}

/// Inclusive range check; a missing value fails any present bound.
fn within<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

fn equals<T: PartialEq>(wanted: Option<T>, value: Option<T>) -> bool {
    wanted.is_none() || wanted == value
}

fn fuzzy(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) if needle.is_empty() => true,
        Some(needle) => haystack.is_some_and(|h| normalize(h).contains(needle)),
    }
}

/// Lower-cases and keeps only ASCII letters and digits.
///
/// `"F-150 Lariat"` and `"f150lariat"` normalize to the same key.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct CarPage {
    pub cars: Vec<Car>,
    /// Number of matches across all pages.
    pub total: usize,
}

/// Filters, sorts, and paginates `cars` according to `filters`.
///
/// Without a sort key the input order is kept.
///
/// # Errors
///
/// Returns [`InvalidInput`] if `page < 1` or `limit < 1`.
pub fn search(cars: &[Car], filters: &CarFilters) -> Result<CarPage, InvalidInput> {
    let (offset, limit) = filters.offset_limit()?;

    let matcher = filters.matcher();
    let mut matches: Vec<&Car> = cars.iter().filter(|car| matcher.matches(car)).collect();

    if let Some(sort_by) = filters.sort_by {
        matches.sort_by(|a, b| sort_by.compare(a, b));
    }

    let total = matches.len();
    let cars = matches
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    Ok(CarPage { cars, total })
}
