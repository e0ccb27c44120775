//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::PgTextExpressionMethods;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

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

mod models;
mod schema;

use models::*;
use schema::{bookings, services, special_days, users, working_hours};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Wire strings of the statuses that occupy time.
const ACTIVE_STATUSES: [&str; 2] = ["PENDING", "CONFIRMED"];

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            connection_timeout_sec: 30,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            connection_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation on the blocking pool with automatic
    /// retry for transient failures (connection errors, timeouts,
    /// serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn insert_user(&self, user: NewUser) -> RepositoryResult<UserAccount> {
        let row = NewUserRow::from_domain(&user);
        self.with_conn(move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .get_result::<UserRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_user"))
        })
        .await?
        .into_domain()
    }

    async fn fetch_user(&self, id: UserId) -> RepositoryResult<Option<UserAccount>> {
        let row = self
            .with_conn(move |conn| {
                users::table
                    .find(id.value())
                    .first::<UserRow>(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("fetch_user"))
            })
            .await?;
        row.map(UserRow::into_domain).transpose()
    }

    async fn fetch_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserAccount>> {
        let email = email.to_string();
        let row = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::email.ilike(email.clone()))
                    .first::<UserRow>(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("fetch_user_by_email"))
            })
            .await?;
        row.map(UserRow::into_domain).transpose()
    }

    async fn list_users(&self, filter: UserFilter) -> RepositoryResult<Vec<UserAccount>> {
        let rows = self
            .with_conn(move |conn| {
                let mut query = users::table.into_boxed();
                if let Some(role) = filter.role {
                    query = query.filter(users::role.eq(role.as_str()));
                }
                if let Some(ref search) = filter.search {
                    let pattern = format!("%{}%", search);
                    query = query.filter(
                        users::name
                            .ilike(pattern.clone())
                            .or(users::email.ilike(pattern.clone()))
                            .or(users::phone.like(pattern)),
                    );
                }
                query
                    .order(users::name.asc())
                    .load::<UserRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_users"))
            })
            .await?;
        rows.into_iter().map(UserRow::into_domain).collect()
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        changes: UserProfileChanges,
    ) -> RepositoryResult<UserAccount> {
        if changes.name.is_none() && changes.email.is_none() && changes.phone.is_none() {
            return self.fetch_user(id).await?.ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "user not found",
                    ErrorContext::new("update_user_profile").with_entity_id(id),
                )
            });
        }

        let row = UserChangesRow {
            name: changes.name,
            email: changes.email,
            phone: changes.phone,
        };
        self.with_conn(move |conn| {
            diesel::update(users::table.find(id.value()))
                .set(&row)
                .get_result::<UserRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_user_profile"))
        })
        .await?
        .into_domain()
    }

    async fn update_user_password(
        &self,
        id: UserId,
        password_hash: String,
    ) -> RepositoryResult<()> {
        let updated = self
            .with_conn(move |conn| {
                diesel::update(users::table.find(id.value()))
                    .set(users::password_hash.eq(password_hash.clone()))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("update_user_password"))
            })
            .await?;
        if updated == 0 {
            return Err(RepositoryError::not_found_with_context(
                "user not found",
                ErrorContext::new("update_user_password").with_entity_id(id),
            ));
        }
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(users::table.find(id.value()))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("delete_user"))
            })
            .await?;
        if deleted == 0 {
            return Err(RepositoryError::not_found_with_context(
                "user not found",
                ErrorContext::new("delete_user").with_entity_id(id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PostgresRepository {
    async fn insert_service(&self, service: NewService) -> RepositoryResult<ServiceOffering> {
        let row = NewServiceRow::from_domain(&service);
        self.with_conn(move |conn| {
            diesel::insert_into(services::table)
                .values(&row)
                .get_result::<ServiceRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_service"))
        })
        .await?
        .into_domain()
    }

    async fn fetch_service(&self, id: ServiceId) -> RepositoryResult<Option<ServiceOffering>> {
        let row = self
            .with_conn(move |conn| {
                services::table
                    .find(id.value())
                    .first::<ServiceRow>(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("fetch_service"))
            })
            .await?;
        row.map(ServiceRow::into_domain).transpose()
    }

    async fn list_services(
        &self,
        filter: ServiceFilter,
    ) -> RepositoryResult<Vec<ServiceOffering>> {
        let rows = self
            .with_conn(move |conn| {
                let mut query = services::table.into_boxed();
                if let Some(category) = filter.category {
                    query = query.filter(services::category.eq(category.as_str()));
                }
                if let Some(is_active) = filter.is_active {
                    query = query.filter(services::is_active.eq(is_active));
                }
                query
                    .order(services::name.asc())
                    .load::<ServiceRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_services"))
            })
            .await?;
        rows.into_iter().map(ServiceRow::into_domain).collect()
    }

    async fn update_service(
        &self,
        id: ServiceId,
        changes: ServiceChanges,
    ) -> RepositoryResult<ServiceOffering> {
        let row = ServiceChangesRow {
            name: changes.name,
            description: changes.description,
            price: changes.price,
            duration_min: changes.duration_min.map(|d| d as i32),
            category: changes.category.map(|c| c.as_str().to_string()),
            is_active: changes.is_active,
        };
        if row.name.is_none()
            && row.description.is_none()
            && row.price.is_none()
            && row.duration_min.is_none()
            && row.category.is_none()
            && row.is_active.is_none()
        {
            return self.fetch_service(id).await?.ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "service not found",
                    ErrorContext::new("update_service").with_entity_id(id),
                )
            });
        }
        self.with_conn(move |conn| {
            diesel::update(services::table.find(id.value()))
                .set(&row)
                .get_result::<ServiceRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_service"))
        })
        .await?
        .into_domain()
    }

    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(services::table.find(id.value()))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("delete_service"))
            })
            .await?;
        if deleted == 0 {
            return Err(RepositoryError::not_found_with_context(
                "service not found",
                ErrorContext::new("delete_service").with_entity_id(id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for PostgresRepository {
    async fn insert_booking(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        let row = NewBookingRow::from_domain(&booking);
        self.with_conn(move |conn| {
            diesel::insert_into(bookings::table)
                .values(&row)
                .get_result::<BookingRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_booking"))
        })
        .await?
        .into_domain()
    }

    async fn fetch_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        let row = self
            .with_conn(move |conn| {
                bookings::table
                    .find(id.value())
                    .first::<BookingRow>(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("fetch_booking"))
            })
            .await?;
        row.map(BookingRow::into_domain).transpose()
    }

    async fn list_bookings(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>> {
        let rows = self
            .with_conn(move |conn| {
                let mut query = bookings::table.into_boxed();
                if let Some(status) = filter.status {
                    query = query.filter(bookings::status.eq(status.as_str()));
                }
                if let Some(date) = filter.date {
                    query = query.filter(bookings::date.eq(date));
                }
                if let Some(client_id) = filter.client_id {
                    query = query.filter(bookings::client_id.eq(client_id.value()));
                }
                if let Some(service_id) = filter.service_id {
                    query = query.filter(bookings::service_id.eq(service_id.value()));
                }
                query
                    .order((bookings::date.asc(), bookings::time_minutes.asc()))
                    .load::<BookingRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_bookings"))
            })
            .await?;
        rows.into_iter().map(BookingRow::into_domain).collect()
    }

    async fn find_active_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> RepositoryResult<Option<Booking>> {
        let minutes = time.minutes() as i32;
        let row = self
            .with_conn(move |conn| {
                bookings::table
                    .filter(bookings::date.eq(date))
                    .filter(bookings::time_minutes.eq(minutes))
                    .filter(bookings::status.eq_any(ACTIVE_STATUSES))
                    .first::<BookingRow>(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("find_active_at"))
            })
            .await?;
        row.map(BookingRow::into_domain).transpose()
    }

    async fn list_active_intervals(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<BookingInterval>> {
        let rows: Vec<(i32, Option<i32>)> = self
            .with_conn(move |conn| {
                bookings::table
                    .left_join(services::table)
                    .filter(bookings::date.eq(date))
                    .filter(bookings::status.eq_any(ACTIVE_STATUSES))
                    .select((bookings::time_minutes, services::duration_min.nullable()))
                    .load(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_active_intervals"))
            })
            .await?;
        rows.into_iter()
            .map(|(time_minutes, duration)| {
                Ok(BookingInterval {
                    start: time_from_minutes(time_minutes)?,
                    duration_min: duration.unwrap_or(0).max(0) as u32,
                })
            })
            .collect()
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        self.with_conn(move |conn| {
            diesel::update(bookings::table.find(id.value()))
                .set(bookings::status.eq(status.as_str()))
                .get_result::<BookingRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_booking_status"))
        })
        .await?
        .into_domain()
    }

    async fn update_booking_notes(
        &self,
        id: BookingId,
        notes: Option<String>,
    ) -> RepositoryResult<Booking> {
        self.with_conn(move |conn| {
            diesel::update(bookings::table.find(id.value()))
                .set(bookings::notes.eq(notes.clone()))
                .get_result::<BookingRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_booking_notes"))
        })
        .await?
        .into_domain()
    }

    async fn count_bookings_for_client(&self, client_id: UserId) -> RepositoryResult<usize> {
        let count: i64 = self
            .with_conn(move |conn| {
                bookings::table
                    .filter(bookings::client_id.eq(client_id.value()))
                    .count()
                    .get_result(conn)
                    .map_err(|e| {
                        RepositoryError::from(e).with_operation("count_bookings_for_client")
                    })
            })
            .await?;
        Ok(count.max(0) as usize)
    }
}

#[async_trait]
impl HoursRepository for PostgresRepository {
    async fn insert_working_hour(
        &self,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour> {
        let row = NewWorkingHourRow {
            weekday: weekday as i16,
            start_minutes: start.minutes() as i32,
            end_minutes: end.minutes() as i32,
        };
        self.with_conn(move |conn| {
            diesel::insert_into(working_hours::table)
                .values(&row)
                .get_result::<WorkingHourRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_working_hour"))
        })
        .await?
        .into_domain()
    }

    async fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>> {
        let rows = self
            .with_conn(move |conn| {
                working_hours::table
                    .order((
                        working_hours::weekday.asc(),
                        working_hours::start_minutes.asc(),
                    ))
                    .load::<WorkingHourRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_working_hours"))
            })
            .await?;
        rows.into_iter().map(WorkingHourRow::into_domain).collect()
    }

    async fn list_working_windows(&self, weekday: u8) -> RepositoryResult<Vec<TimeWindow>> {
        let rows: Vec<(i32, i32)> = self
            .with_conn(move |conn| {
                working_hours::table
                    .filter(working_hours::weekday.eq(weekday as i16))
                    .order(working_hours::start_minutes.asc())
                    .select((working_hours::start_minutes, working_hours::end_minutes))
                    .load(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_working_windows"))
            })
            .await?;
        rows.into_iter()
            .map(|(start, end)| {
                Ok(TimeWindow {
                    start: time_from_minutes(start)?,
                    end: time_from_minutes(end)?,
                })
            })
            .collect()
    }

    async fn update_working_hour(
        &self,
        id: WorkingHourId,
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<WorkingHour> {
        self.with_conn(move |conn| {
            diesel::update(working_hours::table.find(id.value()))
                .set((
                    working_hours::weekday.eq(weekday as i16),
                    working_hours::start_minutes.eq(start.minutes() as i32),
                    working_hours::end_minutes.eq(end.minutes() as i32),
                ))
                .get_result::<WorkingHourRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_working_hour"))
        })
        .await?
        .into_domain()
    }

    async fn delete_working_hour(&self, id: WorkingHourId) -> RepositoryResult<()> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(working_hours::table.find(id.value()))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("delete_working_hour"))
            })
            .await?;
        if deleted == 0 {
            return Err(RepositoryError::not_found_with_context(
                "working hour not found",
                ErrorContext::new("delete_working_hour").with_entity_id(id),
            ));
        }
        Ok(())
    }

    async fn insert_special_day(
        &self,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay> {
        let row = NewSpecialDayRow {
            date,
            start_minutes: start.minutes() as i32,
            end_minutes: end.minutes() as i32,
        };
        self.with_conn(move |conn| {
            diesel::insert_into(special_days::table)
                .values(&row)
                .get_result::<SpecialDayRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_special_day"))
        })
        .await?
        .into_domain()
    }

    async fn list_special_days(&self) -> RepositoryResult<Vec<SpecialDay>> {
        let rows = self
            .with_conn(move |conn| {
                special_days::table
                    .order((special_days::date.asc(), special_days::start_minutes.asc()))
                    .load::<SpecialDayRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_special_days"))
            })
            .await?;
        rows.into_iter().map(SpecialDayRow::into_domain).collect()
    }

    async fn list_special_day_windows(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<TimeWindow>> {
        let rows: Vec<(i32, i32)> = self
            .with_conn(move |conn| {
                special_days::table
                    .filter(special_days::date.eq(date))
                    .order(special_days::start_minutes.asc())
                    .select((special_days::start_minutes, special_days::end_minutes))
                    .load(conn)
                    .map_err(|e| {
                        RepositoryError::from(e).with_operation("list_special_day_windows")
                    })
            })
            .await?;
        rows.into_iter()
            .map(|(start, end)| {
                Ok(TimeWindow {
                    start: time_from_minutes(start)?,
                    end: time_from_minutes(end)?,
                })
            })
            .collect()
    }

    async fn update_special_day(
        &self,
        id: SpecialDayId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> RepositoryResult<SpecialDay> {
        self.with_conn(move |conn| {
            diesel::update(special_days::table.find(id.value()))
                .set((
                    special_days::date.eq(date),
                    special_days::start_minutes.eq(start.minutes() as i32),
                    special_days::end_minutes.eq(end.minutes() as i32),
                ))
                .get_result::<SpecialDayRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_special_day"))
        })
        .await?
        .into_domain()
    }

    async fn delete_special_day(&self, id: SpecialDayId) -> RepositoryResult<()> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(special_days::table.find(id.value()))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("delete_special_day"))
            })
            .await?;
        if deleted == 0 {
            return Err(RepositoryError::not_found_with_context(
                "special day not found",
                ErrorContext::new("delete_special_day").with_entity_id(id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
        })
        .await?;
        Ok(true)
    }
}
