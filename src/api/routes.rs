//! API route configuration.
//!
//! Routes fall into three groups with different protection:
//!
//! - public reads, under the regular rate limit
//! - form submissions and credential checks, under the strict rate limit
//! - admin endpoints, behind Bearer session authentication
//!   ([`crate::api::middleware::auth`])

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use serde_json::json;

use crate::api::handlers::{
    admin::{
        change_password_handler, login_handler, logout_handler, me_handler, recover_handler,
    },
    bookings::{create_booking_handler, list_bookings_handler, update_booking_status_handler},
    calculate_payment_handler,
    cars::{
        create_car_handler, delete_car_handler, get_car_handler, list_cars_handler,
        update_car_handler,
    },
    catalog::{
        admin_list_services_handler, admin_list_testimonials_handler, create_service_handler,
        delete_service_handler, delete_testimonial_handler, get_service_handler,
        list_services_handler, list_testimonials_handler, moderate_testimonial_handler,
        submit_testimonial_handler, update_service_handler,
    },
    contact::{create_contact_handler, list_contact_handler, update_contact_status_handler},
};
use crate::api::middleware::{auth, rate_limit};
use crate::error::AppError;
use crate::state::AppState;

/// Public read endpoints.
///
/// - `POST /calculate-payment` - Loan payment estimate
/// - `GET  /cars`              - Filtered, sorted, paginated inventory
/// - `GET  /cars/{id}`         - One listing
/// - `GET  /services`          - Active service offerings
/// - `GET  /services/{id}`     - One active offering
/// - `GET  /testimonials`      - Approved testimonials
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate-payment", post(calculate_payment_handler))
        .route("/cars", get(list_cars_handler))
        .route("/cars/{id}", get(get_car_handler))
        .route("/services", get(list_services_handler))
        .route("/services/{id}", get(get_service_handler))
        .route("/testimonials", get(list_testimonials_handler))
}

/// Visitor submissions and credential checks.
///
/// - `POST /testimonials`     - Submit a testimonial for moderation
/// - `POST /service-bookings` - Book a service appointment
/// - `POST /contact`          - Send a contact message
/// - `POST /admin/login`      - Issue an admin session
/// - `POST /admin/recover`    - Reset a password with a recovery code
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/testimonials", post(submit_testimonial_handler))
        .route("/service-bookings", post(create_booking_handler))
        .route("/contact", post(create_contact_handler))
        .route("/admin/login", post(login_handler))
        .route("/admin/recover", post(recover_handler))
}

/// Admin endpoints. Callers must layer [`auth::layer`] on top.
///
/// - `POST   /admin/logout`, `GET /admin/me`, `POST /admin/password`
/// - `POST   /cars`, `PATCH /cars/{id}`, `DELETE /cars/{id}`
/// - `GET    /admin/services`, `POST /services`, `PATCH|DELETE /services/{id}`
/// - `GET    /admin/testimonials`, `PATCH|DELETE /testimonials/{id}`
/// - `GET    /service-bookings`, `PATCH /service-bookings/{id}`
/// - `GET    /contact`, `PATCH /contact/{id}`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/logout", post(logout_handler))
        .route("/admin/me", get(me_handler))
        .route("/admin/password", post(change_password_handler))
        .route("/cars", post(create_car_handler))
        .route(
            "/cars/{id}",
            patch(update_car_handler).delete(delete_car_handler),
        )
        .route("/admin/services", get(admin_list_services_handler))
        .route("/services", post(create_service_handler))
        .route(
            "/services/{id}",
            patch(update_service_handler).delete(delete_service_handler),
        )
        .route("/admin/testimonials", get(admin_list_testimonials_handler))
        .route(
            "/testimonials/{id}",
            patch(moderate_testimonial_handler).delete(delete_testimonial_handler),
        )
        .route("/service-bookings", get(list_bookings_handler))
        .route("/service-bookings/{id}", patch(update_booking_status_handler))
        .route("/contact", get(list_contact_handler))
        .route("/contact/{id}", patch(update_contact_status_handler))
}

/// Composes every API route group.
///
/// `rate_limit` carries the `behind_proxy` flag for the per-IP limiters;
/// `None` disables rate limiting, which requires no peer address and is
/// what the integration tests use.
pub fn api_router(state: &AppState, rate_limit: Option<bool>) -> Router<AppState> {
    let admin = admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::layer,
    ));

    let (public, forms, admin) = match rate_limit {
        Some(behind_proxy) => (
            public_routes().layer(rate_limit::layer(behind_proxy)),
            form_routes().layer(rate_limit::secure_layer(behind_proxy)),
            admin.layer(rate_limit::layer(behind_proxy)),
        ),
        None => (public_routes(), form_routes(), admin),
    };

    Router::new()
        .merge(public)
        .merge(forms)
        .merge(admin)
        .fallback(api_not_found)
}

async fn api_not_found() -> AppError {
    AppError::not_found("No such API endpoint", json!({}))
}
