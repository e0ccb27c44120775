//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Authentication requirements are expressed
//! through the `AuthUser` / `AdminUser` extractors in the signatures.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::auth::{issue_token, AdminUser, AuthUser};
use super::dto::{
    AuthResponse, AvailabilityQuery, BookingDto, BookingListQuery, ChangePasswordRequest,
    CreateBookingRequest, CreateServiceRequest, DashboardStats, HealthResponse, LoginRequest,
    MessageResponse, RegisterRequest, ServiceDto, ServiceListQuery, ServiceStats, Slot,
    SpecialDayDto, SpecialDayPayload, UpdateBookingNotesRequest, UpdateBookingStatusRequest,
    UpdateProfileRequest, UpdateServiceRequest, UserBookingDto, UserDetailResponse, UserDto,
    UserListQuery, UserStats, UserSummaryDto, WorkingHourDto, WorkingHourPayload,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    BookingFilter, BookingId, NewService, NewUser, ServiceChanges, ServiceFilter, ServiceId,
    SpecialDayId, UserFilter, UserId, UserProfileChanges, UserRole, WorkingHourId,
};
use crate::db::repository::{BookingRepository, UserRepository};
use crate::db::services as db_services;
use crate::services::{self, passwords};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// GET /
///
/// API index listing the resource roots.
pub async fn api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Salon Booking API",
        "version": "1.0.0",
        "endpoints": {
            "auth": "/api/auth",
            "services": "/api/services",
            "bookings": "/api/bookings",
            "users": "/api/users"
        }
    }))
}

// =============================================================================
// Auth
// =============================================================================

/// POST /api/auth/login
///
/// Verify credentials and issue an access token. Unknown email and wrong
/// password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<AuthResponse> {
    fn invalid() -> AppError {
        AppError::Unauthorized("invalid email or password".to_string())
    }

    let user = state
        .repository
        .fetch_user_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    if !passwords::verify_password(&request.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = issue_token(&state.auth, &user)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// POST /api/auth/register
///
/// Create a client account and issue an access token.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if request.name.trim().is_empty() || request.phone.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and phone must not be empty".to_string(),
        ));
    }
    if !request.email.contains('@') {
        return Err(AppError::BadRequest("invalid email address".to_string()));
    }
    if request.password.len() < passwords::MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {} characters",
            passwords::MIN_PASSWORD_LEN
        )));
    }

    if state
        .repository
        .fetch_user_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("email already registered".to_string()));
    }

    let password_hash = passwords::hash_password(&request.password)?;
    let user = state
        .repository
        .insert_user(NewUser {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
            // New signups are always clients; admins are provisioned directly.
            role: UserRole::Client,
        })
        .await?;

    let token = issue_token(&state.auth, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// GET /api/auth/me
///
/// Return the account behind the presented token.
pub async fn me(State(state): State<AppState>, AuthUser(claims): AuthUser) -> HandlerResult<UserDto> {
    let user = db_services::get_user(state.repository.as_ref(), claims.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
    Ok(Json(user.into()))
}

// =============================================================================
// Catalog
// =============================================================================

/// GET /api/services
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> HandlerResult<Vec<ServiceDto>> {
    let services = db_services::list_services(
        state.repository.as_ref(),
        ServiceFilter {
            category: query.category,
            is_active: query.is_active,
        },
    )
    .await?;
    Ok(Json(services.into_iter().map(Into::into).collect()))
}

/// GET /api/services/{service_id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
) -> HandlerResult<ServiceDto> {
    let service = db_services::get_service(state.repository.as_ref(), ServiceId::new(service_id))
        .await?
        .ok_or_else(|| AppError::NotFound("service not found".to_string()))?;
    Ok(Json(service.into()))
}

/// POST /api/services (admin)
pub async fn create_service(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceDto>), AppError> {
    let service = db_services::create_service(
        state.repository.as_ref(),
        NewService {
            name: request.name,
            description: request.description,
            price: request.price,
            duration_min: request.duration,
            category: request.category,
            is_active: request.is_active,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(service.into())))
}

/// PUT /api/services/{service_id} (admin)
pub async fn update_service(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(service_id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> HandlerResult<ServiceDto> {
    let service = db_services::update_service(
        state.repository.as_ref(),
        ServiceId::new(service_id),
        ServiceChanges {
            name: request.name,
            description: request.description,
            price: request.price,
            duration_min: request.duration,
            category: request.category,
            is_active: request.is_active,
        },
    )
    .await?;
    Ok(Json(service.into()))
}

/// DELETE /api/services/{service_id} (admin)
pub async fn delete_service(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(service_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_service(state.repository.as_ref(), ServiceId::new(service_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/services/stats/overview (admin)
pub async fn service_stats(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> HandlerResult<ServiceStats> {
    Ok(Json(
        services::service_stats(state.repository.as_ref()).await?,
    ))
}

// =============================================================================
// Bookings
// =============================================================================

/// GET /api/bookings
///
/// List bookings. Clients only ever see their own; admins may filter by
/// client, service, status and date.
pub async fn list_bookings(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<BookingListQuery>,
) -> HandlerResult<Vec<BookingDto>> {
    let client_id = if claims.is_admin() {
        query.client_id.map(UserId::new)
    } else {
        Some(claims.user_id())
    };

    let bookings = db_services::list_bookings_detailed(
        state.repository.as_ref(),
        BookingFilter {
            status: query.status,
            date: query.date,
            client_id,
            service_id: query.service_id.map(ServiceId::new),
        },
    )
    .await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// GET /api/bookings/{booking_id}
pub async fn get_booking(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<i64>,
) -> HandlerResult<BookingDto> {
    let detail =
        db_services::get_booking_detailed(state.repository.as_ref(), BookingId::new(booking_id))
            .await?
            .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

    if !claims.is_admin() && detail.booking.client_id != claims.user_id() {
        return Err(AppError::Forbidden("access denied".to_string()));
    }

    Ok(Json(detail.into()))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>), AppError> {
    let detail = services::create_booking(
        state.repository.as_ref(),
        claims.user_id(),
        claims.role,
        services::BookingRequest {
            service_id: ServiceId::new(request.service_id),
            date: request.date,
            time: request.time,
            notes: request.notes,
            status: request.status,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// PATCH /api/bookings/{booking_id}/status (admin)
pub async fn set_booking_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(booking_id): Path<i64>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> HandlerResult<BookingDto> {
    db_services::set_booking_status(
        state.repository.as_ref(),
        BookingId::new(booking_id),
        request.status,
    )
    .await?;
    let detail =
        db_services::get_booking_detailed(state.repository.as_ref(), BookingId::new(booking_id))
            .await?
            .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;
    Ok(Json(detail.into()))
}

/// PATCH /api/bookings/{booking_id}/notes (admin)
pub async fn set_booking_notes(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(booking_id): Path<i64>,
    Json(request): Json<UpdateBookingNotesRequest>,
) -> HandlerResult<BookingDto> {
    db_services::set_booking_notes(
        state.repository.as_ref(),
        BookingId::new(booking_id),
        Some(request.notes),
    )
    .await?;
    let detail =
        db_services::get_booking_detailed(state.repository.as_ref(), BookingId::new(booking_id))
            .await?
            .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;
    Ok(Json(detail.into()))
}

/// DELETE /api/bookings/{booking_id}
///
/// Cancel a booking. Clients may only cancel their own, and only while it is
/// pending or confirmed.
pub async fn cancel_booking(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let id = BookingId::new(booking_id);
    let booking = state
        .repository
        .fetch_booking(id)
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

    if !claims.is_admin() && booking.client_id != claims.user_id() {
        return Err(AppError::Forbidden("access denied".to_string()));
    }

    db_services::cancel_booking(state.repository.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bookings/availability/{date}
///
/// Slots for a date, optionally checked against a service's duration.
/// Public: the booking page shows availability before login.
pub async fn availability(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<Vec<Slot>> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {}", date)))?;

    let slots = services::availability_for_date(
        state.repository.as_ref(),
        date,
        query.service_id.map(ServiceId::new),
    )
    .await?;
    Ok(Json(slots))
}

/// GET /api/bookings/stats/dashboard (admin)
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> HandlerResult<DashboardStats> {
    Ok(Json(
        services::dashboard_stats(state.repository.as_ref()).await?,
    ))
}

// =============================================================================
// Schedule configuration (admin)
// =============================================================================

/// GET /api/bookings/working-hours (admin)
pub async fn list_working_hours(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> HandlerResult<Vec<WorkingHourDto>> {
    let hours = db_services::list_working_hours(state.repository.as_ref()).await?;
    Ok(Json(hours.into_iter().map(Into::into).collect()))
}

/// POST /api/bookings/working-hours (admin)
pub async fn create_working_hour(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(payload): Json<WorkingHourPayload>,
) -> Result<(StatusCode, Json<WorkingHourDto>), AppError> {
    let hour = db_services::create_working_hour(
        state.repository.as_ref(),
        payload.weekday,
        payload.start_time,
        payload.end_time,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(hour.into())))
}

/// PUT /api/bookings/working-hours/{id} (admin)
pub async fn update_working_hour(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<WorkingHourPayload>,
) -> HandlerResult<WorkingHourDto> {
    let hour = db_services::update_working_hour(
        state.repository.as_ref(),
        WorkingHourId::new(id),
        payload.weekday,
        payload.start_time,
        payload.end_time,
    )
    .await?;
    Ok(Json(hour.into()))
}

/// DELETE /api/bookings/working-hours/{id} (admin)
pub async fn delete_working_hour(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_working_hour(state.repository.as_ref(), WorkingHourId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bookings/special-days (admin)
pub async fn list_special_days(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> HandlerResult<Vec<SpecialDayDto>> {
    let days = db_services::list_special_days(state.repository.as_ref()).await?;
    Ok(Json(days.into_iter().map(Into::into).collect()))
}

/// POST /api/bookings/special-days (admin)
pub async fn create_special_day(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(payload): Json<SpecialDayPayload>,
) -> Result<(StatusCode, Json<SpecialDayDto>), AppError> {
    let day = db_services::create_special_day(
        state.repository.as_ref(),
        payload.date,
        payload.start_time,
        payload.end_time,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(day.into())))
}

/// PUT /api/bookings/special-days/{id} (admin)
pub async fn update_special_day(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<SpecialDayPayload>,
) -> HandlerResult<SpecialDayDto> {
    let day = db_services::update_special_day(
        state.repository.as_ref(),
        SpecialDayId::new(id),
        payload.date,
        payload.start_time,
        payload.end_time,
    )
    .await?;
    Ok(Json(day.into()))
}

/// DELETE /api/bookings/special-days/{id} (admin)
pub async fn delete_special_day(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_special_day(state.repository.as_ref(), SpecialDayId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Users
// =============================================================================

/// GET /api/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Query(query): Query<UserListQuery>,
) -> HandlerResult<Vec<UserSummaryDto>> {
    let users = db_services::list_users(
        state.repository.as_ref(),
        UserFilter {
            role: query.role,
            search: query.search,
        },
    )
    .await?;

    let mut summaries = Vec::with_capacity(users.len());
    for user in users {
        let booking_count = state
            .repository
            .count_bookings_for_client(user.id)
            .await?;
        summaries.push(UserSummaryDto {
            user: user.into(),
            booking_count,
        });
    }
    Ok(Json(summaries))
}

/// GET /api/users/{user_id}
///
/// User detail with booking history. Clients may only read themselves.
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
) -> HandlerResult<UserDetailResponse> {
    let id = UserId::new(user_id);
    if !claims.is_admin() && claims.user_id() != id {
        return Err(AppError::Forbidden("access denied".to_string()));
    }

    let user = db_services::get_user(state.repository.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    let mut history = db_services::list_bookings_detailed(
        state.repository.as_ref(),
        BookingFilter {
            client_id: Some(id),
            ..Default::default()
        },
    )
    .await?;
    // Most recent first in the profile view.
    history.sort_by(|a, b| (b.booking.date, b.booking.time).cmp(&(a.booking.date, a.booking.time)));

    let bookings = history
        .into_iter()
        .map(|detail| UserBookingDto {
            id: detail.booking.id.value(),
            date: detail.booking.date,
            time: detail.booking.time,
            status: detail.booking.status,
            service_name: detail.service_name,
            service_price: detail.service_price,
        })
        .collect();

    Ok(Json(UserDetailResponse {
        user: user.into(),
        bookings,
    }))
}

/// PUT /api/users/{user_id}
///
/// Update profile fields. Clients may only update themselves.
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateProfileRequest>,
) -> HandlerResult<UserDto> {
    let id = UserId::new(user_id);
    if !claims.is_admin() && claims.user_id() != id {
        return Err(AppError::Forbidden("access denied".to_string()));
    }

    let user = db_services::update_user_profile(
        state.repository.as_ref(),
        id,
        UserProfileChanges {
            name: request.name,
            email: request.email,
            phone: request.phone,
        },
    )
    .await?;
    Ok(Json(user.into()))
}

/// PATCH /api/users/{user_id}/password
///
/// Change password after verifying the current one.
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<ChangePasswordRequest>,
) -> HandlerResult<MessageResponse> {
    let id = UserId::new(user_id);
    if !claims.is_admin() && claims.user_id() != id {
        return Err(AppError::Forbidden("access denied".to_string()));
    }
    if request.new_password.len() < passwords::MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {} characters",
            passwords::MIN_PASSWORD_LEN
        )));
    }

    let user = db_services::get_user(state.repository.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    if !passwords::verify_password(&request.current_password, &user.password_hash) {
        return Err(AppError::BadRequest(
            "current password is incorrect".to_string(),
        ));
    }

    let password_hash = passwords::hash_password(&request.new_password)?;
    state
        .repository
        .update_user_password(id, password_hash)
        .await?;

    Ok(Json(MessageResponse {
        message: "password changed successfully".to_string(),
    }))
}

/// DELETE /api/users/{user_id} (admin)
///
/// Delete an account; refused while the account still has bookings.
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_user(state.repository.as_ref(), UserId::new(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/stats/overview (admin)
pub async fn user_stats(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> HandlerResult<UserStats> {
    Ok(Json(services::user_stats(state.repository.as_ref()).await?))
}
