//! Service layer for business logic and orchestration.
//!
//! This module sits between the HTTP handlers and the repository layer:
//! it fetches the data an operation needs, applies the business rules, and
//! leaves persistence details to the repositories.

pub mod availability;

pub mod booking;

pub mod passwords;

pub mod stats;

pub use availability::availability_for_date;
pub use booking::{create_booking, BookingRequest};
pub use stats::{
    dashboard_stats, service_stats, user_stats, DashboardStats, ServiceStats, UserStats,
};
