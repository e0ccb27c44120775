//! Booking repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{
    Booking, BookingFilter, BookingId, BookingInterval, BookingStatus, NewBooking, UserId,
};
use crate::models::TimeOfDay;

/// Repository trait for booking operations.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking and return it with its assigned id.
    async fn insert_booking(&self, booking: NewBooking) -> RepositoryResult<Booking>;

    /// Fetch a booking by id.
    async fn fetch_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;

    /// List bookings matching the filter, ordered by date then time.
    async fn list_bookings(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>>;

    /// Find an active (pending or confirmed) booking at exactly this
    /// date and time, if any. This is the uniqueness check that arbitrates
    /// concurrent attempts to claim the same slot.
    async fn find_active_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> RepositoryResult<Option<Booking>>;

    /// Start time and service duration of every active booking on a date,
    /// as consumed by the availability calculator. The duration is joined in
    /// from the booked service; bookings whose service no longer exists
    /// report a zero duration.
    async fn list_active_intervals(&self, date: NaiveDate)
        -> RepositoryResult<Vec<BookingInterval>>;

    /// Set the status of a booking. Fails with `NotFound` for unknown ids.
    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking>;

    /// Replace the notes of a booking. Fails with `NotFound` for unknown ids.
    async fn update_booking_notes(
        &self,
        id: BookingId,
        notes: Option<String>,
    ) -> RepositoryResult<Booking>;

    /// Number of bookings (in any state) belonging to a client.
    async fn count_bookings_for_client(&self, client_id: UserId) -> RepositoryResult<usize>;
}
