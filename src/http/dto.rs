//! Data Transfer Objects for the HTTP API.
//!
//! Wire shapes use camelCase field names, matching what the React frontend
//! consumes. Domain records are converted here; in particular, user DTOs
//! never carry the password hash.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    BookingDetail, BookingStatus, ServiceCategory, ServiceOffering, SpecialDay, UserAccount,
    UserRole, WorkingHour,
};
use crate::models::TimeOfDay;

// Re-export response types produced directly by the service layer.
pub use crate::api::Slot;
pub use crate::services::stats::{DashboardStats, ServiceStats, UserStats};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Generic confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
}

// =============================================================================
// Users
// =============================================================================

/// User fields exposed over the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for UserDto {
    fn from(user: UserAccount) -> Self {
        Self {
            id: user.id.value(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// User listing entry with its booking count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub booking_count: usize,
}

/// One entry in a user's booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingDto {
    pub id: i64,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: BookingStatus,
    pub service_name: String,
    pub service_price: f64,
}

/// User detail with recent booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserDto,
    pub bookings: Vec<UserBookingDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Query parameters for user listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub search: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Service fields exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Duration in minutes
    pub duration: u32,
    pub category: ServiceCategory,
    pub is_active: bool,
}

impl From<ServiceOffering> for ServiceDto {
    fn from(service: ServiceOffering) -> Self {
        Self {
            id: service.id.value(),
            name: service.name,
            description: service.description,
            price: service.price,
            duration: service.duration_min,
            category: service.category,
            is_active: service.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Duration in minutes
    pub duration: u32,
    pub category: ServiceCategory,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Query parameters for catalog listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListQuery {
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// =============================================================================
// Bookings
// =============================================================================

/// Booking fields exposed over the API, with client and service fields
/// joined in for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub client_id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_by: UserRole,
    pub created_at: DateTime<Utc>,
    pub client_name: String,
    pub client_phone: String,
    pub service_name: String,
    pub service_price: f64,
    /// Booked service's duration in minutes
    pub service_duration: u32,
}

impl From<BookingDetail> for BookingDto {
    fn from(detail: BookingDetail) -> Self {
        let booking = detail.booking;
        Self {
            id: booking.id.value(),
            client_id: booking.client_id.value(),
            service_id: booking.service_id.value(),
            date: booking.date,
            time: booking.time,
            status: booking.status,
            notes: booking.notes,
            created_by: booking.created_by,
            created_at: booking.created_at,
            client_name: detail.client_name,
            client_phone: detail.client_phone,
            service_name: detail.service_name,
            service_price: detail.service_price,
            service_duration: detail.service_duration_min,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    #[serde(default)]
    pub notes: Option<String>,
    /// Explicit initial status; defaults by requester role when absent.
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingNotesRequest {
    pub notes: String,
}

/// Query parameters for booking listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub service_id: Option<i64>,
}

// =============================================================================
// Schedule configuration
// =============================================================================

/// Recurring working-hour window exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHourDto {
    pub id: i64,
    pub weekday: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl From<WorkingHour> for WorkingHourDto {
    fn from(hour: WorkingHour) -> Self {
        Self {
            id: hour.id.value(),
            weekday: hour.weekday,
            start_time: hour.start,
            end_time: hour.end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHourPayload {
    pub weekday: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Special-day window exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDayDto {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl From<SpecialDay> for SpecialDayDto {
    fn from(day: SpecialDay) -> Self {
        Self {
            id: day.id.value(),
            date: day.date,
            start_time: day.start,
            end_time: day.end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDayPayload {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}
