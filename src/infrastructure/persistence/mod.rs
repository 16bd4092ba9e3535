//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgCarRepository`] - Vehicle inventory
//! - [`PgOfferingRepository`] / [`PgTestimonialRepository`] - Catalog content
//! - [`PgBookingRepository`] / [`PgContactRepository`] - Visitor submissions
//! - [`PgAdminRepository`] - Admin credentials and sessions

pub mod pg_admin_repository;
pub mod pg_car_repository;
pub mod pg_catalog_repository;
pub mod pg_inbox_repository;

pub use pg_admin_repository::PgAdminRepository;
pub use pg_car_repository::PgCarRepository;
pub use pg_catalog_repository::{PgOfferingRepository, PgTestimonialRepository};
pub use pg_inbox_repository::{PgBookingRepository, PgContactRepository};

/// Embedded schema migrations, applied at startup and by `admin db migrate`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
