#![allow(dead_code)]

//! In-memory repositories and fixtures for handler tests.
//!
//! The fixtures mirror the PostgreSQL repositories' observable behavior
//! (id assignment, default statuses, ordering) so handlers can be exercised
//! end to end without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use dealership::application::services::{
    AuthService, BookingService, CarService, CatalogService, ContactService,
};
use dealership::domain::entities::{
    AdminCredentials, AdminSession, BookingStatus, Car, CarStatus, ContactMessage, MessageStatus,
    NewCar, NewContactMessage, NewServiceBooking, NewServiceOffering, NewTestimonial,
    ServiceBooking, ServiceOffering, Testimonial,
};
use dealership::domain::repositories::{
    AdminRepository, BookingRepository, CarRepository, ContactRepository, OfferingRepository,
    TestimonialRepository,
};
use dealership::error::AppError;
use dealership::infrastructure::cache::NullCache;
use dealership::routes::service_router;
use dealership::state::AppState;

pub const ADMIN_USERNAME: &str = "manager";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

struct Table<T> {
    rows: Mutex<Vec<T>>,
    next_id: Mutex<i64>,
}

impl<T: Clone> Table<T> {
    fn new(rows: Vec<T>, next_id: i64) -> Self {
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
        }
    }

    fn next_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }

    fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }
}

fn missing(what: &str, id: i64) -> AppError {
    AppError::not_found(format!("{what} not found"), json!({ "id": id }))
}

// ─── Cars ────────────────────────────────────────────────────────────────────

pub struct MemoryCarRepository(Table<Car>);

impl MemoryCarRepository {
    pub fn new(cars: Vec<Car>) -> Self {
        let next = cars.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self(Table::new(cars, next))
    }
}

#[async_trait]
impl CarRepository for MemoryCarRepository {
    async fn list_all(&self) -> Result<Vec<Car>, AppError> {
        let mut cars = self.0.all();
        cars.sort_by_key(|c| c.id);
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        Ok(self.0.all().into_iter().find(|c| c.id == id))
    }

    async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let car = Car {
            id: self.0.next_id(),
            make: new_car.make,
            model: new_car.model,
            year: new_car.year,
            price: new_car.price,
            mileage: new_car.mileage,
            color: new_car.color,
            interior_color: new_car.interior_color,
            fuel_type: new_car.fuel_type,
            transmission: new_car.transmission,
            drivetrain: new_car.drivetrain,
            body_style: new_car.body_style,
            engine: new_car.engine,
            trim: new_car.trim,
            condition: new_car.condition,
            status: new_car.status,
            number_of_seats: new_car.number_of_seats,
            number_of_doors: new_car.number_of_doors,
            mpg_city: new_car.mpg_city,
            mpg_highway: new_car.mpg_highway,
            safety_rating: new_car.safety_rating,
            dealer_rating: new_car.dealer_rating,
            days_on_market: new_car.days_on_market,
            vehicle_history: new_car.vehicle_history,
            financing: new_car.financing,
            images: new_car.images,
            description: new_car.description,
            vin: new_car.vin,
            features: new_car.features,
            created_at: Utc::now(),
        };
        self.0.rows.lock().unwrap().push(car.clone());
        Ok(car)
    }

    async fn update(&self, car: Car) -> Result<Car, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or_else(|| missing("Car", car.id))?;
        *slot = car.clone();
        Ok(car)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.0.rows.lock().unwrap().len() as i64)
    }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

pub struct MemoryOfferingRepository(Table<ServiceOffering>);

impl MemoryOfferingRepository {
    pub fn new(offerings: Vec<ServiceOffering>) -> Self {
        let next = offerings.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        Self(Table::new(offerings, next))
    }
}

#[async_trait]
impl OfferingRepository for MemoryOfferingRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<ServiceOffering>, AppError> {
        Ok(self
            .0
            .all()
            .into_iter()
            .filter(|o| !active_only || o.is_active)
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError> {
        Ok(self.0.all().into_iter().find(|o| o.id == id))
    }

    async fn create(&self, offering: NewServiceOffering) -> Result<ServiceOffering, AppError> {
        let offering = ServiceOffering {
            id: self.0.next_id(),
            name: offering.name,
            description: offering.description,
            starting_price: offering.starting_price,
            category: offering.category,
            icon: offering.icon,
            image: offering.image,
            image_url: offering.image_url,
            features: offering.features,
            duration: offering.duration,
            is_active: offering.is_active,
        };
        self.0.rows.lock().unwrap().push(offering.clone());
        Ok(offering)
    }

    async fn update(&self, offering: ServiceOffering) -> Result<ServiceOffering, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|o| o.id == offering.id)
            .ok_or_else(|| missing("Service", offering.id))?;
        *slot = offering.clone();
        Ok(offering)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| o.id != id);
        Ok(rows.len() < before)
    }
}

pub struct MemoryTestimonialRepository(Table<Testimonial>);

impl MemoryTestimonialRepository {
    pub fn new(testimonials: Vec<Testimonial>) -> Self {
        let next = testimonials.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self(Table::new(testimonials, next))
    }
}

#[async_trait]
impl TestimonialRepository for MemoryTestimonialRepository {
    async fn list(&self, approved: Option<bool>) -> Result<Vec<Testimonial>, AppError> {
        let mut rows: Vec<Testimonial> = self
            .0
            .all()
            .into_iter()
            .filter(|t| approved.is_none_or(|a| t.is_approved == a))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(&self, testimonial: NewTestimonial) -> Result<Testimonial, AppError> {
        let testimonial = Testimonial {
            id: self.0.next_id(),
            name: testimonial.name,
            role: testimonial.role,
            rating: testimonial.rating,
            comment: testimonial.comment,
            image: testimonial.image,
            is_approved: false,
            created_at: Utc::now(),
        };
        self.0.rows.lock().unwrap().push(testimonial.clone());
        Ok(testimonial)
    }

    async fn set_approved(
        &self,
        id: i64,
        approved: bool,
    ) -> Result<Option<Testimonial>, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|t| t.id == id).map(|t| {
            t.is_approved = approved;
            t.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}

// ─── Inbox ───────────────────────────────────────────────────────────────────

pub struct MemoryBookingRepository(Table<ServiceBooking>);

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self(Table::new(Vec::new(), 1))
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create(&self, booking: NewServiceBooking) -> Result<ServiceBooking, AppError> {
        let booking = ServiceBooking {
            id: self.0.next_id(),
            full_name: booking.full_name,
            phone: booking.phone,
            email: booking.email,
            vehicle_info: booking.vehicle_info,
            service_type: booking.service_type,
            preferred_date: booking.preferred_date,
            preferred_time: booking.preferred_time,
            description: booking.description,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        self.0.rows.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError> {
        Ok(self
            .0
            .all()
            .into_iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceBooking>, AppError> {
        Ok(self.0.all().into_iter().find(|b| b.id == id))
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<ServiceBooking>, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|b| b.id == id && b.status == from)
            .map(|b| {
                b.status = to;
                b.clone()
            }))
    }

    async fn count_by_status(&self) -> Result<Vec<(BookingStatus, i64)>, AppError> {
        let rows = self.0.all();
        Ok([
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ]
        .into_iter()
        .map(|s| (s, rows.iter().filter(|b| b.status == s).count() as i64))
        .collect())
    }
}

pub struct MemoryContactRepository(Table<ContactMessage>);

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self(Table::new(Vec::new(), 1))
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, AppError> {
        let message = ContactMessage {
            id: self.0.next_id(),
            first_name: message.first_name,
            last_name: message.last_name,
            email: message.email,
            phone: message.phone,
            interest: message.interest,
            message: message.message,
            status: MessageStatus::Unread,
            created_at: Utc::now(),
        };
        self.0.rows.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, AppError> {
        Ok(self
            .0
            .all()
            .into_iter()
            .filter(|m| status.is_none_or(|s| m.status == s))
            .collect())
    }

    async fn update_status(
        &self,
        id: i64,
        status: MessageStatus,
    ) -> Result<ContactMessage, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let message = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| missing("Message", id))?;
        message.status = status;
        Ok(message.clone())
    }

    async fn count_by_status(&self) -> Result<Vec<(MessageStatus, i64)>, AppError> {
        let rows = self.0.all();
        Ok([
            MessageStatus::Unread,
            MessageStatus::Read,
            MessageStatus::Responded,
        ]
        .into_iter()
        .map(|s| (s, rows.iter().filter(|m| m.status == s).count() as i64))
        .collect())
    }
}

// ─── Admin ───────────────────────────────────────────────────────────────────

pub struct MemoryAdminRepository {
    admins: Table<AdminCredentials>,
    sessions: Mutex<Vec<(String, i64, DateTime<Utc>)>>,
}

impl MemoryAdminRepository {
    pub fn new() -> Self {
        Self {
            admins: Table::new(Vec::new(), 1),
            sessions: Mutex::new(Vec::new()),
        }
    }

    fn with_admin<R>(
        &self,
        admin_id: i64,
        f: impl FnOnce(&mut AdminCredentials) -> R,
    ) -> Option<R> {
        let mut rows = self.admins.rows.lock().unwrap();
        rows.iter_mut().find(|a| a.id == admin_id).map(f)
    }
}

#[async_trait]
impl AdminRepository for MemoryAdminRepository {
    async fn create_credentials(
        &self,
        username: &str,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<AdminCredentials, AppError> {
        if self.admins.all().iter().any(|a| a.username == username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "admin_credentials_username_key" }),
            ));
        }

        let now = Utc::now();
        let admin = AdminCredentials {
            id: self.admins.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            recovery_code_hash: recovery_code_hash.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.admins.rows.lock().unwrap().push(admin.clone());
        Ok(admin)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, AppError> {
        Ok(self.admins.all().into_iter().find(|a| a.username == username))
    }

    async fn list_credentials(&self) -> Result<Vec<AdminCredentials>, AppError> {
        Ok(self.admins.all())
    }

    async fn update_password(&self, admin_id: i64, password_hash: &str) -> Result<(), AppError> {
        self.with_admin(admin_id, |a| a.password_hash = password_hash.to_string())
            .ok_or_else(|| missing("Admin", admin_id))
    }

    async fn reset_credentials(
        &self,
        admin_id: i64,
        password_hash: &str,
        recovery_code_hash: &str,
    ) -> Result<(), AppError> {
        self.with_admin(admin_id, |a| {
            a.password_hash = password_hash.to_string();
            a.recovery_code_hash = recovery_code_hash.to_string();
        })
        .ok_or_else(|| missing("Admin", admin_id))
    }

    async fn deactivate(&self, username: &str) -> Result<bool, AppError> {
        let Some(admin) = self.find_by_username(username).await? else {
            return Ok(false);
        };
        self.with_admin(admin.id, |a| a.is_active = false);
        self.sessions
            .lock()
            .unwrap()
            .retain(|(_, id, _)| *id != admin.id);
        Ok(true)
    }

    async fn create_session(
        &self,
        token_hash: &str,
        admin_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .push((token_hash.to_string(), admin_id, expires_at));
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError> {
        let session = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|(hash, _, _)| hash == token_hash)
            .cloned();

        let Some((token_hash, admin_id, expires_at)) = session else {
            return Ok(None);
        };

        Ok(self
            .admins
            .all()
            .into_iter()
            .find(|a| a.id == admin_id && a.is_active)
            .map(|a| AdminSession {
                token_hash,
                admin_id,
                username: a.username,
                expires_at,
            }))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .retain(|(hash, _, _)| hash != token_hash);
        Ok(())
    }

    async fn delete_other_sessions(
        &self,
        admin_id: i64,
        keep_token_hash: Option<String>,
    ) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|(hash, id, _)| *id != admin_id || Some(hash) == keep_token_hash.as_ref());
        Ok((before - sessions.len()) as u64)
    }

    async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|(_, _, expires_at)| *expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// A used, available listing; tests adjust fields as needed.
pub fn car(id: i64, make: &str, model: &str, price: i64, year: i32) -> Car {
    Car {
        id,
        make: make.to_string(),
        model: model.to_string(),
        year,
        price: Decimal::from(price),
        mileage: 30_000,
        color: "White".to_string(),
        interior_color: Some("Black".to_string()),
        fuel_type: "Gasoline".to_string(),
        transmission: "Automatic".to_string(),
        drivetrain: Some("FWD".to_string()),
        body_style: Some("Sedan".to_string()),
        engine: None,
        trim: None,
        condition: "used".to_string(),
        status: CarStatus::Available,
        number_of_seats: Some(5),
        number_of_doors: Some(4),
        mpg_city: Some(30),
        mpg_highway: Some(38),
        safety_rating: None,
        dealer_rating: None,
        days_on_market: None,
        vehicle_history: Some("Clean".to_string()),
        financing: true,
        images: Vec::new(),
        description: None,
        vin: None,
        features: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::days(id),
    }
}

/// Six listings: four Toyotas at different prices, a Honda, and a sold Ford.
pub fn inventory() -> Vec<Car> {
    let mut hybrid = car(4, "Toyota", "Prius", 24_500, 2022);
    hybrid.fuel_type = "Hybrid".to_string();
    hybrid.features = vec!["Bluetooth".to_string(), "Sunroof".to_string()];

    let mut sold = car(6, "Ford", "F-150", 38_000, 2020);
    sold.status = CarStatus::Sold;
    sold.body_style = Some("Truck".to_string());

    vec![
        car(1, "Toyota", "Camry", 18_500, 2020),
        car(2, "Toyota", "Corolla", 15_900, 2019),
        car(3, "Honda", "Civic", 17_200, 2021),
        hybrid,
        car(5, "Toyota", "RAV4", 19_750, 2021),
        sold,
    ]
}

pub fn offering(id: i64, name: &str, is_active: bool) -> ServiceOffering {
    ServiceOffering {
        id,
        name: name.to_string(),
        description: format!("{name} by certified technicians"),
        starting_price: Decimal::new(4999, 2),
        category: "maintenance".to_string(),
        icon: "wrench".to_string(),
        image: None,
        image_url: None,
        features: vec!["Multi-point inspection".to_string()],
        duration: Some("45 minutes".to_string()),
        is_active,
    }
}

pub fn testimonial(id: i64, name: &str, is_approved: bool) -> Testimonial {
    Testimonial {
        id,
        name: name.to_string(),
        role: "Customer".to_string(),
        rating: 5,
        comment: "Smooth purchase, fair price.".to_string(),
        image: None,
        is_approved,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::days(id),
    }
}

/// Builds application state over fixture repositories and a disabled cache.
pub fn create_test_state(cars: Vec<Car>) -> AppState {
    let cache = Arc::new(NullCache::new());

    let car_service = CarService::new(
        Arc::new(MemoryCarRepository::new(cars)),
        cache.clone(),
        None,
    );
    let catalog_service = CatalogService::new(
        Arc::new(MemoryOfferingRepository::new(vec![
            offering(1, "Oil Change", true),
            offering(2, "Winter Tire Swap", false),
        ])),
        Arc::new(MemoryTestimonialRepository::new(vec![
            testimonial(1, "Priya", true),
            testimonial(2, "Marco", false),
        ])),
    );
    let auth_service = AuthService::new(
        Arc::new(MemoryAdminRepository::new()),
        "test-signing-secret-0123456789".to_string(),
        Duration::hours(12),
    );

    AppState {
        car_service: Arc::new(car_service),
        catalog_service: Arc::new(catalog_service),
        booking_service: Arc::new(BookingService::new(Arc::new(MemoryBookingRepository::new()))),
        contact_service: Arc::new(ContactService::new(Arc::new(MemoryContactRepository::new()))),
        auth_service: Arc::new(auth_service),
        cache,
    }
}

/// Test server over the full API router without rate limiting.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(service_router(state, None)).unwrap()
}

/// Creates the standard admin account and returns its recovery code.
pub async fn create_admin(state: &AppState) -> String {
    let (_, recovery_code) = state
        .auth_service
        .create_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();
    recovery_code
}

/// Logs the standard admin in and returns the session token.
pub async fn login(server: &TestServer) -> String {
    let response = server
        .post("/api/admin/login")
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}
