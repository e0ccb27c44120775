//! Diesel row types and their conversions to and from domain records.
//!
//! Times of day are stored as integer minute offsets; roles, statuses and
//! categories as their wire strings. Conversions back to domain types treat
//! unparseable stored values as internal errors (data corruption), never as
//! user-facing validation failures.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{bookings, services, special_days, users, working_hours};
use crate::api::{
    Booking, BookingId, BookingStatus, NewBooking, NewService, NewUser, ServiceCategory,
    ServiceId, ServiceOffering, SpecialDay, SpecialDayId, UserAccount, UserId, UserRole,
    WorkingHour, WorkingHourId,
};
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::TimeOfDay;

pub(super) fn time_from_minutes(minutes: i32) -> RepositoryResult<TimeOfDay> {
    u16::try_from(minutes)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| {
            RepositoryError::internal(format!("invalid stored time offset: {}", minutes))
        })
}

fn role_from_str(s: &str) -> RepositoryResult<UserRole> {
    UserRole::parse(s)
        .ok_or_else(|| RepositoryError::internal(format!("invalid stored role: {}", s)))
}

fn status_from_str(s: &str) -> RepositoryResult<BookingStatus> {
    BookingStatus::parse(s)
        .ok_or_else(|| RepositoryError::internal(format!("invalid stored status: {}", s)))
}

fn category_from_str(s: &str) -> RepositoryResult<ServiceCategory> {
    ServiceCategory::parse(s)
        .ok_or_else(|| RepositoryError::internal(format!("invalid stored category: {}", s)))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_domain(self) -> RepositoryResult<UserAccount> {
        Ok(UserAccount {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            password_hash: self.password_hash,
            role: role_from_str(&self.role)?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: String,
}

impl NewUserRow {
    pub fn from_domain(user: &NewUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangesRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_min: i32,
    pub category: String,
    pub is_active: bool,
}

impl ServiceRow {
    pub fn into_domain(self) -> RepositoryResult<ServiceOffering> {
        Ok(ServiceOffering {
            id: ServiceId::new(self.id),
            name: self.name,
            description: self.description,
            price: self.price,
            duration_min: self.duration_min.max(0) as u32,
            category: category_from_str(&self.category)?,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub struct NewServiceRow {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_min: i32,
    pub category: String,
    pub is_active: bool,
}

impl NewServiceRow {
    pub fn from_domain(service: &NewService) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price,
            duration_min: service.duration_min as i32,
            category: service.category.as_str().to_string(),
            is_active: service.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = services)]
pub struct ServiceChangesRow {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_min: Option<i32>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: i64,
    pub client_id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub time_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl BookingRow {
    pub fn into_domain(self) -> RepositoryResult<Booking> {
        Ok(Booking {
            id: BookingId::new(self.id),
            client_id: UserId::new(self.client_id),
            service_id: ServiceId::new(self.service_id),
            date: self.date,
            time: time_from_minutes(self.time_minutes)?,
            status: status_from_str(&self.status)?,
            notes: self.notes,
            created_by: role_from_str(&self.created_by)?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub client_id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub time_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: String,
}

impl NewBookingRow {
    pub fn from_domain(booking: &NewBooking) -> Self {
        Self {
            client_id: booking.client_id.value(),
            service_id: booking.service_id.value(),
            date: booking.date,
            time_minutes: booking.time.minutes() as i32,
            status: booking.status.as_str().to_string(),
            notes: booking.notes.clone(),
            created_by: booking.created_by.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = working_hours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkingHourRow {
    pub id: i64,
    pub weekday: i16,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl WorkingHourRow {
    pub fn into_domain(self) -> RepositoryResult<WorkingHour> {
        Ok(WorkingHour {
            id: WorkingHourId::new(self.id),
            weekday: self.weekday.max(0) as u8,
            start: time_from_minutes(self.start_minutes)?,
            end: time_from_minutes(self.end_minutes)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = working_hours)]
pub struct NewWorkingHourRow {
    pub weekday: i16,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = special_days)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SpecialDayRow {
    pub id: i64,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl SpecialDayRow {
    pub fn into_domain(self) -> RepositoryResult<SpecialDay> {
        Ok(SpecialDay {
            id: SpecialDayId::new(self.id),
            date: self.date,
            start: time_from_minutes(self.start_minutes)?,
            end: time_from_minutes(self.end_minutes)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = special_days)]
pub struct NewSpecialDayRow {
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
}
