//! Booking creation flow.
//!
//! Creating a booking is the one write path that consults the availability
//! calculator: the requested slot must exist in the day's open windows and
//! the whole service duration must fit. The direct uniqueness check against
//! the repository stays in place regardless — it is what arbitrates two
//! concurrent requests racing for the same slot; the calculator only
//! advises, never reserves.

use chrono::NaiveDate;

use crate::api::{
    BookingDetail, BookingStatus, NewBooking, ServiceId, UserId, UserRole,
};
use crate::db::repository::{
    BookingRepository, CatalogRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult,
};
use crate::db::services as db_services;
use crate::models::TimeOfDay;
use crate::services::availability::availability_for_date;

/// A request to book a service at a date and time.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub notes: Option<String>,
    /// Explicit initial status; defaults by requester role when absent
    /// (admins book confirmed, clients book pending).
    pub status: Option<BookingStatus>,
}

/// Create a booking on behalf of `client` (acting as `requester_role`).
pub async fn create_booking(
    repo: &dyn FullRepository,
    client: UserId,
    requester_role: UserRole,
    request: BookingRequest,
) -> RepositoryResult<BookingDetail> {
    let service = repo
        .fetch_service(request.service_id)
        .await?
        .ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "service not found",
                ErrorContext::new("create_booking").with_entity_id(request.service_id),
            )
        })?;

    if !service.is_active {
        return Err(RepositoryError::validation_with_context(
            "service is not available",
            ErrorContext::new("create_booking").with_entity_id(service.id),
        ));
    }

    // Uniqueness check first: this is the race arbiter for the slot.
    if repo
        .find_active_at(request.date, request.time)
        .await?
        .is_some()
    {
        return Err(RepositoryError::validation_with_context(
            "time slot is already taken",
            ErrorContext::new("create_booking")
                .with_details(format!("date={} time={}", request.date, request.time)),
        ));
    }

    // The slot must exist in the day's open windows and fit the whole
    // service duration without crossing a gap or running past closing.
    let slots = availability_for_date(repo, request.date, Some(service.id)).await?;
    let bookable = slots
        .iter()
        .any(|s| s.time == request.time && s.available);
    if !bookable {
        return Err(RepositoryError::validation_with_context(
            "requested time is not bookable for this service",
            ErrorContext::new("create_booking")
                .with_details(format!("date={} time={}", request.date, request.time)),
        ));
    }

    let status = request.status.unwrap_or(match requester_role {
        UserRole::Admin => BookingStatus::Confirmed,
        UserRole::Client => BookingStatus::Pending,
    });

    let booking = repo
        .insert_booking(NewBooking {
            client_id: client,
            service_id: service.id,
            date: request.date,
            time: request.time,
            status,
            notes: request.notes,
            created_by: requester_role,
        })
        .await?;

    db_services::get_booking_detailed(repo, booking.id)
        .await?
        .ok_or_else(|| RepositoryError::internal("booking vanished after insert"))
}
