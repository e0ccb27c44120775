//! In-memory repository for unit testing and local development.
//!
//! State lives in `BTreeMap`s behind a `parking_lot::RwLock`, so iteration
//! order (and therefore test output) is deterministic. Ids are assigned from
//! a single monotonically increasing counter, mirroring a database sequence.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use crate::api::{
    Booking, BookingFilter, BookingId, BookingInterval, BookingStatus, NewBooking, NewService,
    NewUser, ServiceChanges, ServiceFilter, ServiceId, ServiceOffering, SpecialDay, SpecialDayId,
    TimeWindow, UserAccount, UserFilter, UserId, UserProfileChanges, WorkingHour, WorkingHourId,
};
use crate::db::repository::{
    BookingRepository, CatalogRepository, ErrorContext, FullRepository, HoursRepository,
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::TimeOfDay;

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, UserAccount>,
    services: BTreeMap<i64, ServiceOffering>,
    bookings: BTreeMap<i64, Booking>,
    working_hours: BTreeMap<i64, WorkingHour>,
    special_days: BTreeMap<i64, SpecialDay>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of the repository traits.
#[derive(Debug, Default)]
pub struct LocalRepository {
    inner: RwLock<Inner>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(entity: &str, id: impl ToString) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("{} not found", entity),
        ErrorContext::default()
            .with_entity(entity)
            .with_entity_id(id),
    )
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn insert_user(&self, user: NewUser) -> RepositoryResult<UserAccount> {
        let mut inner = self.inner.write();
        if inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::validation_with_context(
                "email already registered",
                ErrorContext::new("insert_user").with_entity("user"),
            ));
        }
        let id = inner.next_id();
        let account = UserAccount {
            id: UserId::new(id),
            name: user.name,
            email: user.email,
            phone: user.phone,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        inner.users.insert(id, account.clone());
        Ok(account)
    }

    async fn fetch_user(&self, id: UserId) -> RepositoryResult<Option<UserAccount>> {
        Ok(self.inner.read().users.get(&id.value()).cloned())
    }

    async fn fetch_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserAccount>> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users(&self, filter: UserFilter) -> RepositoryResult<Vec<UserAccount>> {
        let inner = self.inner.read();
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut users: Vec<UserAccount> = inner
            .users
            .values()
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| {
                needle.as_deref().is_none_or(|s| {
                    u.name.to_lowercase().contains(s)
                        || u.email.to_lowercase().contains(s)
                        || u.phone.contains(s)
                })
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        changes: UserProfileChanges,
    ) -> RepositoryResult<UserAccount> {
        let mut inner = self.inner.write();
        if let Some(ref email) = changes.email {
            if inner
                .users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(RepositoryError::validation_with_context(
                    "email already in use",
                    ErrorContext::new("update_user_profile").with_entity("user"),
                ));
            }
        }
        let user = inner
            .users
            .get_mut(&id.value())
            .ok_or_else(|| not_found("user", id))?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(phone) = changes.phone {
            user.phone = phone;
        }
        Ok(user.clone())
    }

    async fn update_user_password(
        &self,
        id: UserId,
        password_hash: String,
    ) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        let user = inner
            .users
            .get_mut(&id.value())
            .ok_or_else(|| not_found("user", id))?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner
            .users
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| not_found("user", id))
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn insert_service(&self, service: NewService) -> RepositoryResult<ServiceOffering> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let offering = ServiceOffering {
            id: ServiceId::new(id),
            name: service.name,
            description: service.description,
            price: service.price,
            duration_min: service.duration_min,
            category: service.category,
            is_active: service.is_active,
        };
        inner.services.insert(id, offering.clone());
        Ok(offering)
    }

    async fn fetch_service(&self, id: ServiceId) -> RepositoryResult<Option<ServiceOffering>> {
        Ok(self.inner.read().services.get(&id.value()).cloned())
    }

    async fn list_services(
        &self,
        filter: ServiceFilter,
    ) -> RepositoryResult<Vec<ServiceOffering>> {
        let inner = self.inner.read();
        let mut services: Vec<ServiceOffering> = inner
            .services
            .values()
            .filter(|s| filter.category.is_none_or(|c| s.category == c))
            .filter(|s| filter.is_active.is_none_or(|a| s.is_active == a))
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn update_service(
        &self,
        id: ServiceId,
        changes: ServiceChanges,
    ) -> RepositoryResult<ServiceOffering> {
        let mut inner = self.inner.write();
        let service = inner
            .services
            .get_mut(&id.value())
            .ok_or_else(|| not_found("service", id))?;
        if let Some(name) = changes.name {
            service.name = name;
        }
        if let Some(description) = changes.description {
            service.description = description;
        }
        if let Some(price) = changes.price {
            service.price = price;
        }
        if let Some(duration_min) = changes.duration_min {
            service.duration_min = duration_min;
        }
        if let Some(category) = changes.category {
            service.category = category;
        }
        if let Some(is_active) = changes.is_active {
            service.is_active = is_active;
        }
        Ok(service.clone())
    }

    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner
            .services
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| not_found("service", id))
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn insert_booking(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let record = Booking {
            id: BookingId::new(id),
            client_id: booking.client_id,
            service_id: booking.service_id,
            date: booking.date,
            time: booking.time,
            status: booking.status,
            notes: booking.notes,
            created_by: booking.created_by,
            created_at: Utc::now(),
        };
        inner.bookings.insert(id, record.clone());
        Ok(record)
    }

    async fn fetch_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        Ok(self.inner.read().bookings.get(&id.value()).cloned())
    }

    async fn list_bookings(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>> {
        let inner = self.inner.read();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| filter.status.is_none_or(|s| b.status == s))
            .filter(|b| filter.date.is_none_or(|d| b.date == d))
            .filter(|b| filter.client_id.is_none_or(|c| b.client_id == c))
            .filter(|b| filter.service_id.is_none_or(|s| b.service_id == s))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(bookings)
    }

    async fn find_active_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> RepositoryResult<Option<Booking>> {
        Ok(self
            .inner
            .read()
            .bookings
            .values()
            .find(|b| b.date == date && b.time == time && b.status.is_active())
            .cloned())
    }

    async fn list_active_intervals(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<BookingInterval>> {
        let inner = self.inner.read();
        Ok(inner
            .bookings
            .values()
            .filter(|b| b.date == date && b.status.is_active())
            .map(|b| BookingInterval {
                start: b.time,
                duration_min: inner
                    .services
                    .get(&b.service_id.value())
                    .map(|s| s.duration_min)
                    .unwrap_or(0),
            })
            .collect())
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        let mut inner = self.inner.write();
        let booking = inner
            .bookings
            .get_mut(&id.value())
            .ok_or_else(|| not_found("booking", id))?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn update_booking_notes(
        &self,
        id: BookingId,
        notes: Option<String>,
    ) -> RepositoryResult<Booking> {
        let mut inner = self.inner.write();
        let booking = inner
            .bookings
            .get_mut(&id.value())
            .ok_or_else(|| not_found("booking", id))?;
        booking.notes = notes;
        Ok(booking.clone())
    }

    async fn count_bookings_for_client(&self, client_id: UserId) -> RepositoryResult<usize> {
        Ok(self
            .inner
            .read()
            .bookings
            .values()
            .filter(|b| b.client_id == client_id)
            .count())
    }
}

#[async_trait]
impl HoursRepository for LocalRepository {
    async fn insert_working_hour(
        &self,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let hour = WorkingHour {
            id: WorkingHourId::new(id),
            weekday,
            start,
            end,
        };
        inner.working_hours.insert(id, hour.clone());
        Ok(hour)
    }

    async fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>> {
        let mut hours: Vec<WorkingHour> =
            self.inner.read().working_hours.values().cloned().collect();
        hours.sort_by_key(|h| (h.weekday, h.start));
        Ok(hours)
    }

    async fn list_working_windows(&self, weekday: u8) -> RepositoryResult<Vec<TimeWindow>> {
        let inner = self.inner.read();
        let mut windows: Vec<TimeWindow> = inner
            .working_hours
            .values()
            .filter(|h| h.weekday == weekday)
            .map(|h| TimeWindow {
                start: h.start,
                end: h.end,
            })
            .collect();
        windows.sort_by_key(|w| w.start);
        Ok(windows)
    }

    async fn update_working_hour(
        &self,
        id: WorkingHourId,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour> {
        let mut inner = self.inner.write();
        let hour = inner
            .working_hours
            .get_mut(&id.value())
            .ok_or_else(|| not_found("working_hour", id))?;
        hour.weekday = weekday;
        hour.start = start;
        hour.end = end;
        Ok(hour.clone())
    }

    async fn delete_working_hour(&self, id: WorkingHourId) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner
            .working_hours
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| not_found("working_hour", id))
    }

    async fn insert_special_day(
        &self,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let day = SpecialDay {
            id: SpecialDayId::new(id),
            date,
            start,
            end,
        };
        inner.special_days.insert(id, day.clone());
        Ok(day)
    }

    async fn list_special_days(&self) -> RepositoryResult<Vec<SpecialDay>> {
        let mut days: Vec<SpecialDay> =
            self.inner.read().special_days.values().cloned().collect();
        days.sort_by_key(|d| (d.date, d.start));
        Ok(days)
    }

    async fn list_special_day_windows(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<TimeWindow>> {
        let inner = self.inner.read();
        let mut windows: Vec<TimeWindow> = inner
            .special_days
            .values()
            .filter(|d| d.date == date)
            .map(|d| TimeWindow {
                start: d.start,
                end: d.end,
            })
            .collect();
        windows.sort_by_key(|w| w.start);
        Ok(windows)
    }

    async fn update_special_day(
        &self,
        id: SpecialDayId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay> {
        let mut inner = self.inner.write();
        let day = inner
            .special_days
            .get_mut(&id.value())
            .ok_or_else(|| not_found("special_day", id))?;
        day.date = date;
        day.start = start;
        day.end = end;
        Ok(day.clone())
    }

    async fn delete_special_day(&self, id: SpecialDayId) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner
            .special_days
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| not_found("special_day", id))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            password_hash: "hash".to_string(),
            role: crate::api::UserRole::Client,
        }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_email() {
        let repo = LocalRepository::new();
        repo.insert_user(new_user("a@example.com")).await.unwrap();
        let err = repo
            .insert_user(new_user("A@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = LocalRepository::new();
        let a = repo.insert_user(new_user("a@example.com")).await.unwrap();
        let b = repo.insert_user(new_user("b@example.com")).await.unwrap();
        assert!(b.id.value() > a.id.value());
    }

    #[tokio::test]
    async fn test_delete_unknown_user_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo.delete_user(UserId::new(999)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
