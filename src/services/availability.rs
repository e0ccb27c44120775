//! Availability orchestration.
//!
//! Bridges the repository layer and the pure calculator in
//! [`crate::scheduler`]: fetches the windows and bookings that govern a
//! date, resolves the requested service's duration, and hands everything to
//! `compute_availability`.

use chrono::{Datelike, NaiveDate};

use crate::api::{ServiceId, Slot};
use crate::db::repository::{
    BookingRepository, CatalogRepository, FullRepository, HoursRepository, RepositoryResult,
};
use crate::scheduler;

/// Compute the bookable slots for a date.
///
/// Special-day windows take precedence over the recurring weekly schedule
/// (weekday 0 = Sunday). When `service_id` is given and resolves to a known
/// service, its duration drives the feasibility check; an unknown id or no
/// id at all yields plain occupancy-based availability.
///
/// A date with no configured hours produces an empty list, not an error.
pub async fn availability_for_date(
    repo: &dyn FullRepository,
    date: NaiveDate,
    service_id: Option<ServiceId>,
) -> RepositoryResult<Vec<Slot>> {
    let special = repo.list_special_day_windows(date).await?;
    let recurring = if special.is_empty() {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        repo.list_working_windows(weekday).await?
    } else {
        Vec::new()
    };
    let windows = scheduler::resolve_windows(special, recurring);

    let bookings = repo.list_active_intervals(date).await?;

    let requested_duration = match service_id {
        Some(id) => repo.fetch_service(id).await?.map(|s| s.duration_min),
        None => None,
    };

    Ok(scheduler::compute_availability(
        &windows,
        &bookings,
        requested_duration,
    ))
}
