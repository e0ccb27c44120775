//! High-level data services over the repository traits.
//!
//! These functions are what the HTTP handlers call: they validate input,
//! orchestrate repository operations, and enrich records for display. They
//! work with any `FullRepository` implementation.

use crate::api::{
    Booking, BookingDetail, BookingFilter, BookingId, BookingStatus, NewService, ServiceChanges,
    ServiceFilter, ServiceId, ServiceOffering, SpecialDay, SpecialDayId, UserAccount, UserFilter,
    UserId, UserProfileChanges, WorkingHour, WorkingHourId,
};
use crate::db::repository::{
    BookingRepository, CatalogRepository, ErrorContext, FullRepository, HoursRepository,
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::TimeOfDay;
use chrono::NaiveDate;

/// Check that the repository is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// =============================================================================
// Catalog
// =============================================================================

pub async fn list_services(
    repo: &dyn FullRepository,
    filter: ServiceFilter,
) -> RepositoryResult<Vec<ServiceOffering>> {
    repo.list_services(filter).await
}

pub async fn get_service(
    repo: &dyn FullRepository,
    id: ServiceId,
) -> RepositoryResult<Option<ServiceOffering>> {
    repo.fetch_service(id).await
}

/// Create a catalog service after validating price and duration.
pub async fn create_service(
    repo: &dyn FullRepository,
    service: NewService,
) -> RepositoryResult<ServiceOffering> {
    if service.price < 0.0 {
        return Err(RepositoryError::validation_with_context(
            "price must not be negative",
            ErrorContext::new("create_service").with_entity("service"),
        ));
    }
    if service.duration_min == 0 {
        return Err(RepositoryError::validation_with_context(
            "duration must be at least one minute",
            ErrorContext::new("create_service").with_entity("service"),
        ));
    }
    repo.insert_service(service).await
}

pub async fn update_service(
    repo: &dyn FullRepository,
    id: ServiceId,
    changes: ServiceChanges,
) -> RepositoryResult<ServiceOffering> {
    if changes.price.is_some_and(|p| p < 0.0) {
        return Err(RepositoryError::validation_with_context(
            "price must not be negative",
            ErrorContext::new("update_service").with_entity_id(id),
        ));
    }
    if changes.duration_min == Some(0) {
        return Err(RepositoryError::validation_with_context(
            "duration must be at least one minute",
            ErrorContext::new("update_service").with_entity_id(id),
        ));
    }
    repo.update_service(id, changes).await
}

pub async fn delete_service(repo: &dyn FullRepository, id: ServiceId) -> RepositoryResult<()> {
    repo.delete_service(id).await
}

// =============================================================================
// Bookings
// =============================================================================

/// List bookings with client and service fields joined in for display.
pub async fn list_bookings_detailed(
    repo: &dyn FullRepository,
    filter: BookingFilter,
) -> RepositoryResult<Vec<BookingDetail>> {
    let bookings = repo.list_bookings(filter).await?;
    let mut detailed = Vec::with_capacity(bookings.len());
    for booking in bookings {
        detailed.push(enrich_booking(repo, booking).await?);
    }
    Ok(detailed)
}

/// Fetch one booking with client and service fields joined in.
pub async fn get_booking_detailed(
    repo: &dyn FullRepository,
    id: BookingId,
) -> RepositoryResult<Option<BookingDetail>> {
    match repo.fetch_booking(id).await? {
        Some(booking) => Ok(Some(enrich_booking(repo, booking).await?)),
        None => Ok(None),
    }
}

async fn enrich_booking(
    repo: &dyn FullRepository,
    booking: Booking,
) -> RepositoryResult<BookingDetail> {
    let client = repo.fetch_user(booking.client_id).await?;
    let service = repo.fetch_service(booking.service_id).await?;
    Ok(BookingDetail {
        client_name: client.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
        client_phone: client.map(|c| c.phone).unwrap_or_default(),
        service_name: service.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
        service_price: service.as_ref().map(|s| s.price).unwrap_or(0.0),
        service_duration_min: service.map(|s| s.duration_min).unwrap_or(0),
        booking,
    })
}

pub async fn set_booking_status(
    repo: &dyn FullRepository,
    id: BookingId,
    status: BookingStatus,
) -> RepositoryResult<Booking> {
    repo.update_booking_status(id, status).await
}

pub async fn set_booking_notes(
    repo: &dyn FullRepository,
    id: BookingId,
    notes: Option<String>,
) -> RepositoryResult<Booking> {
    repo.update_booking_notes(id, notes).await
}

/// Cancel a booking. Only pending or confirmed bookings can be cancelled;
/// ownership is checked by the caller, which has the requester at hand.
pub async fn cancel_booking(repo: &dyn FullRepository, id: BookingId) -> RepositoryResult<Booking> {
    let booking = repo
        .fetch_booking(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("booking not found"))?;

    if !booking.status.is_active() {
        return Err(RepositoryError::validation_with_context(
            "only pending or confirmed bookings can be cancelled",
            ErrorContext::new("cancel_booking")
                .with_entity("booking")
                .with_entity_id(id),
        ));
    }

    repo.update_booking_status(id, BookingStatus::Cancelled)
        .await
}

// =============================================================================
// Schedule configuration
// =============================================================================

fn validate_window(
    operation: &str,
    start: TimeOfDay,
    end: TimeOfDay,
) -> RepositoryResult<()> {
    if start >= end {
        return Err(RepositoryError::validation_with_context(
            "window start must be before its end",
            ErrorContext::new(operation).with_details(format!("start={} end={}", start, end)),
        ));
    }
    Ok(())
}

fn validate_weekday(operation: &str, weekday: u8) -> RepositoryResult<()> {
    if weekday > 6 {
        return Err(RepositoryError::validation_with_context(
            "weekday must be in 0..=6 (0 = Sunday)",
            ErrorContext::new(operation).with_details(format!("weekday={}", weekday)),
        ));
    }
    Ok(())
}

pub async fn list_working_hours(repo: &dyn FullRepository) -> RepositoryResult<Vec<WorkingHour>> {
    repo.list_working_hours().await
}

pub async fn create_working_hour(
    repo: &dyn FullRepository,
    weekday: u8,
    start: TimeOfDay,
    end: TimeOfDay,
) -> RepositoryResult<WorkingHour> {
    validate_weekday("create_working_hour", weekday)?;
    validate_window("create_working_hour", start, end)?;
    repo.insert_working_hour(weekday, start, end).await
}

pub async fn update_working_hour(
    repo: &dyn FullRepository,
    id: WorkingHourId,
    weekday: u8,
    start: TimeOfDay,
    end: TimeOfDay,
) -> RepositoryResult<WorkingHour> {
    validate_weekday("update_working_hour", weekday)?;
    validate_window("update_working_hour", start, end)?;
    repo.update_working_hour(id, weekday, start, end).await
}

pub async fn delete_working_hour(
    repo: &dyn FullRepository,
    id: WorkingHourId,
) -> RepositoryResult<()> {
    repo.delete_working_hour(id).await
}

pub async fn list_special_days(repo: &dyn FullRepository) -> RepositoryResult<Vec<SpecialDay>> {
    repo.list_special_days().await
}

pub async fn create_special_day(
    repo: &dyn FullRepository,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> RepositoryResult<SpecialDay> {
    validate_window("create_special_day", start, end)?;
    repo.insert_special_day(date, start, end).await
}

pub async fn update_special_day(
    repo: &dyn FullRepository,
    id: SpecialDayId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> RepositoryResult<SpecialDay> {
    validate_window("update_special_day", start, end)?;
    repo.update_special_day(id, date, start, end).await
}

pub async fn delete_special_day(
    repo: &dyn FullRepository,
    id: SpecialDayId,
) -> RepositoryResult<()> {
    repo.delete_special_day(id).await
}

// =============================================================================
// Users
// =============================================================================

pub async fn list_users(
    repo: &dyn FullRepository,
    filter: UserFilter,
) -> RepositoryResult<Vec<UserAccount>> {
    repo.list_users(filter).await
}

pub async fn get_user(
    repo: &dyn FullRepository,
    id: UserId,
) -> RepositoryResult<Option<UserAccount>> {
    repo.fetch_user(id).await
}

pub async fn update_user_profile(
    repo: &dyn FullRepository,
    id: UserId,
    changes: UserProfileChanges,
) -> RepositoryResult<UserAccount> {
    repo.update_user_profile(id, changes).await
}

/// Delete a user account, refusing while bookings reference it.
pub async fn delete_user(repo: &dyn FullRepository, id: UserId) -> RepositoryResult<()> {
    let bookings = repo.count_bookings_for_client(id).await?;
    if bookings > 0 {
        return Err(RepositoryError::validation_with_context(
            "cannot delete a user that has bookings",
            ErrorContext::new("delete_user")
                .with_entity("user")
                .with_entity_id(id)
                .with_details(format!("bookings={}", bookings)),
        ));
    }
    repo.delete_user(id).await
}
