//! Public domain types for the salon backend.
//!
//! This file consolidates the records shared across the repository, service
//! and HTTP layers. Everything that crosses the API boundary derives
//! Serialize/Deserialize for JSON serialization; the password hash never
//! leaves the repository layer (see `http::dto` for the wire shapes).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;
use crate::models::TimeOfDay;

define_id_type!(i64, UserId);
define_id_type!(i64, ServiceId);
define_id_type!(i64, BookingId);
define_id_type!(i64, WorkingHourId);
define_id_type!(i64, SpecialDayId);

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "CLIENT",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CLIENT" => Some(UserRole::Client),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Lifecycle state of a booking.
///
/// Only active bookings (pending or confirmed) occupy time in the
/// availability computation; cancelled and completed bookings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether this booking still occupies its time slots.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "COMPLETED" => Some(BookingStatus::Completed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Category of a catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Manicure,
    Pedicure,
    Polish,
    NailArt,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Manicure => "MANICURE",
            ServiceCategory::Pedicure => "PEDICURE",
            ServiceCategory::Polish => "POLISH",
            ServiceCategory::NailArt => "NAIL_ART",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MANICURE" => Some(ServiceCategory::Manicure),
            "PEDICURE" => Some(ServiceCategory::Pedicure),
            "POLISH" => Some(ServiceCategory::Polish),
            "NAIL_ART" => Some(ServiceCategory::NailArt),
            _ => None,
        }
    }
}

/// A registered user account.
///
/// Deliberately does not derive Serialize: the stored password hash must not
/// leak through accidental JSON serialization. HTTP responses go through
/// `http::dto::UserDto`.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Profile fields an update may change. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Filter for user listings.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    /// Case-insensitive substring match against name, email or phone.
    pub search: Option<String>,
}

/// A bookable service in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_min: u32,
    pub category: ServiceCategory,
    pub is_active: bool,
}

/// Fields for creating a catalog service.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_min: u32,
    pub category: ServiceCategory,
    pub is_active: bool,
}

/// Catalog fields an update may change. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_min: Option<u32>,
    pub category: Option<ServiceCategory>,
    pub is_active: Option<bool>,
}

/// Filter for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub category: Option<ServiceCategory>,
    pub is_active: Option<bool>,
}

/// A booking of a service at a date and time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub client_id: UserId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: BookingStatus,
    pub notes: Option<String>,
    /// Role of the account that created the booking.
    pub created_by: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: UserId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_by: UserRole,
}

/// Filter for booking listings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub date: Option<NaiveDate>,
    pub client_id: Option<UserId>,
    pub service_id: Option<ServiceId>,
}

/// A recurring weekly opening window. Weekday 0 is Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHour {
    pub id: WorkingHourId,
    pub weekday: u8,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A date-specific opening window that replaces the recurring schedule
/// for its date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDay {
    pub id: SpecialDayId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A half-open opening interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Create a window, enforcing `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

/// Start time and duration of an existing active booking, as consumed by the
/// availability calculator. The duration is the booked service's own
/// duration, not the duration of the service currently being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingInterval {
    pub start: TimeOfDay,
    pub duration_min: u32,
}

/// A booking joined with the client and service fields the dashboards and
/// listings display. Lookups that fail (deleted client or service) fall back
/// to empty/zero values rather than dropping the booking from history.
#[derive(Debug, Clone)]
pub struct BookingDetail {
    pub booking: Booking,
    pub client_name: String,
    pub client_phone: String,
    pub service_name: String,
    pub service_price: f64,
    pub service_duration_min: u32,
}

/// One bookable (or blocked) slot in an availability response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: TimeOfDay,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_new() {
        let id = BookingId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_id_equality_and_ordering() {
        assert_eq!(UserId::new(7), UserId::new(7));
        assert_ne!(UserId::new(7), UserId::new(8));
        assert!(ServiceId::new(1) < ServiceId::new(2));
    }

    #[test]
    fn test_ids_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(BookingId::new(1));
        set.insert(BookingId::new(2));
        set.insert(BookingId::new(1)); // Duplicate
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_active_statuses() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("DELETED"), None);
    }

    #[test]
    fn test_role_string_roundtrip() {
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("CLIENT"), Some(UserRole::Client));
        assert_eq!(UserRole::parse("client"), None);
    }

    #[test]
    fn test_status_serde_uses_wire_names() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
        let cat = serde_json::to_string(&ServiceCategory::NailArt).unwrap();
        assert_eq!(cat, "\"NAIL_ART\"");
    }

    #[test]
    fn test_time_window_rejects_inverted() {
        let start: TimeOfDay = "10:00".parse().unwrap();
        let end: TimeOfDay = "09:00".parse().unwrap();
        assert!(TimeWindow::new(start, end).is_none());
        assert!(TimeWindow::new(end, start).is_some());
        assert!(TimeWindow::new(start, start).is_none());
    }
}