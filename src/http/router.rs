//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_api = Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/me", get(handlers::me));

    let services_api = Router::new()
        .route("/", get(handlers::list_services).post(handlers::create_service))
        .route("/stats/overview", get(handlers::service_stats))
        .route(
            "/{service_id}",
            get(handlers::get_service)
                .put(handlers::update_service)
                .delete(handlers::delete_service),
        );

    let bookings_api = Router::new()
        .route("/", get(handlers::list_bookings).post(handlers::create_booking))
        .route("/availability/{date}", get(handlers::availability))
        .route("/stats/dashboard", get(handlers::dashboard_stats))
        // Schedule configuration
        .route(
            "/working-hours",
            get(handlers::list_working_hours).post(handlers::create_working_hour),
        )
        .route(
            "/working-hours/{id}",
            put(handlers::update_working_hour).delete(handlers::delete_working_hour),
        )
        .route(
            "/special-days",
            get(handlers::list_special_days).post(handlers::create_special_day),
        )
        .route(
            "/special-days/{id}",
            put(handlers::update_special_day).delete(handlers::delete_special_day),
        )
        // Booking lifecycle
        .route(
            "/{booking_id}",
            get(handlers::get_booking).delete(handlers::cancel_booking),
        )
        .route("/{booking_id}/status", patch(handlers::set_booking_status))
        .route("/{booking_id}/notes", patch(handlers::set_booking_notes));

    let users_api = Router::new()
        .route("/", get(handlers::list_users))
        .route("/stats/overview", get(handlers::user_stats))
        .route(
            "/{user_id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/{user_id}/password", patch(handlers::change_password));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::api_index))
        .nest("/api/auth", auth_api)
        .nest("/api/services", services_api)
        .nest("/api/bookings", bookings_api)
        .nest("/api/users", users_api)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::http::auth::AuthConfig;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo, AuthConfig::with_secret("router-test"));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
