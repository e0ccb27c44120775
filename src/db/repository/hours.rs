//! Schedule configuration repository trait: recurring working hours and
//! date-specific special days.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{SpecialDay, SpecialDayId, TimeWindow, WorkingHour, WorkingHourId};
use crate::models::TimeOfDay;

/// Repository trait for opening-hours configuration.
#[async_trait]
pub trait HoursRepository: Send + Sync {
    /// Insert a recurring window and return it with its assigned id.
    async fn insert_working_hour(
        &self,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour>;

    /// All recurring windows, ordered by weekday then start time.
    async fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>>;

    /// Recurring windows for one weekday, ordered by start time.
    async fn list_working_windows(&self, weekday: u8) -> RepositoryResult<Vec<TimeWindow>>;

    /// Replace a recurring window. Fails with `NotFound` for unknown ids.
    async fn update_working_hour(
        &self,
        id: WorkingHourId,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour>;

    /// Delete a recurring window. Fails with `NotFound` for unknown ids.
    async fn delete_working_hour(&self, id: WorkingHourId) -> RepositoryResult<()>;

    /// Insert a special-day window and return it with its assigned id.
    async fn insert_special_day(
        &self,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay>;

    /// All special days, ordered by date then start time.
    async fn list_special_days(&self) -> RepositoryResult<Vec<SpecialDay>>;

    /// Special-day windows for one date, ordered by start time. A non-empty
    /// result fully replaces the recurring schedule for that date.
    async fn list_special_day_windows(&self, date: NaiveDate)
        -> RepositoryResult<Vec<TimeWindow>>;

    /// Replace a special-day window. Fails with `NotFound` for unknown ids.
    async fn update_special_day(
        &self,
        id: SpecialDayId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay>;

    /// Delete a special-day window. Fails with `NotFound` for unknown ids.
    async fn delete_special_day(&self, id: SpecialDayId) -> RepositoryResult<()>;
}
