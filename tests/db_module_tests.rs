//! Repository, data-service and statistics coverage against the in-memory
//! backend.

mod support;

use chrono::Utc;
use salon_rust::api::{
    BookingStatus, ServiceCategory, ServiceFilter, UserFilter, UserProfileChanges, UserRole,
};
use salon_rust::db::factory::RepositoryFactory;
use salon_rust::db::repository::{CatalogRepository, FullRepository, RepositoryError};
use salon_rust::db::services as db_services;
use salon_rust::services::{dashboard_stats, service_stats, user_stats};
use support::{date, seeded_repository, tod};

#[tokio::test]
async fn factory_builds_a_working_local_repository() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn user_listing_filters_by_role_and_search() {
    let fixture = seeded_repository().await;

    let admins = db_services::list_users(
        &fixture.repo,
        UserFilter {
            role: Some(UserRole::Admin),
            search: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, fixture.admin.id);

    let by_name = db_services::list_users(
        &fixture.repo,
        UserFilter {
            role: None,
            search: Some("maria".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, fixture.client.id);

    let by_phone = db_services::list_users(
        &fixture.repo,
        UserFilter {
            role: None,
            search: Some("555-0001".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].id, fixture.admin.id);
}

#[tokio::test]
async fn profile_update_rejects_taken_email() {
    let fixture = seeded_repository().await;

    let err = db_services::update_user_profile(
        &fixture.repo,
        fixture.client.id,
        UserProfileChanges {
            email: Some("admin@salon.test".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let renamed = db_services::update_user_profile(
        &fixture.repo,
        fixture.client.id,
        UserProfileChanges {
            name: Some("Maria S.".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Maria S.");
    assert_eq!(renamed.email, "client@salon.test");
}

#[tokio::test]
async fn catalog_rejects_invalid_price_and_duration() {
    let fixture = seeded_repository().await;

    let err = db_services::create_service(
        &fixture.repo,
        salon_rust::api::NewService {
            name: "Broken".to_string(),
            description: "x".to_string(),
            price: -1.0,
            duration_min: 30,
            category: ServiceCategory::Polish,
            is_active: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let err = db_services::create_service(
        &fixture.repo,
        salon_rust::api::NewService {
            name: "Broken".to_string(),
            description: "x".to_string(),
            price: 10.0,
            duration_min: 0,
            category: ServiceCategory::Polish,
            is_active: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn catalog_listing_filters_by_category_and_active_flag() {
    let fixture = seeded_repository().await;
    fixture
        .repo
        .insert_service(salon_rust::api::NewService {
            name: "Gel Polish".to_string(),
            description: "Gel application".to_string(),
            price: 45.0,
            duration_min: 45,
            category: ServiceCategory::Polish,
            is_active: false,
        })
        .await
        .unwrap();

    let manicures = db_services::list_services(
        &fixture.repo,
        ServiceFilter {
            category: Some(ServiceCategory::Manicure),
            is_active: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(manicures.len(), 1);
    assert_eq!(manicures[0].name, "Full Manicure");

    let active = db_services::list_services(
        &fixture.repo,
        ServiceFilter {
            category: None,
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn schedule_configuration_is_validated() {
    let fixture = seeded_repository().await;

    // Inverted window.
    let err = db_services::create_working_hour(&fixture.repo, 1, tod("12:00"), tod("09:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // Weekday out of range.
    let err = db_services::create_working_hour(&fixture.repo, 7, tod("09:00"), tod("12:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // Special days get the same window validation.
    let err = db_services::create_special_day(
        &fixture.repo,
        date("2099-01-01"),
        tod("15:00"),
        tod("14:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn working_hours_list_in_week_order() {
    let fixture = seeded_repository().await;
    db_services::create_working_hour(&fixture.repo, 3, tod("09:00"), tod("12:00"))
        .await
        .unwrap();
    db_services::create_working_hour(&fixture.repo, 1, tod("14:00"), tod("18:00"))
        .await
        .unwrap();
    db_services::create_working_hour(&fixture.repo, 1, tod("09:00"), tod("12:00"))
        .await
        .unwrap();

    let hours = db_services::list_working_hours(&fixture.repo).await.unwrap();
    let order: Vec<(u8, String)> = hours
        .iter()
        .map(|h| (h.weekday, h.start.to_string()))
        .collect();
    assert_eq!(
        order,
        [
            (1, "09:00".to_string()),
            (1, "14:00".to_string()),
            (3, "09:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn booking_listings_are_enriched_and_ordered() {
    let fixture = seeded_repository().await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.pedicure.id,
            date("2099-03-02"),
            "10:00",
            BookingStatus::Confirmed,
        )
        .await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            date("2099-03-02"),
            "09:00",
            BookingStatus::Pending,
        )
        .await;

    let bookings =
        db_services::list_bookings_detailed(&fixture.repo, Default::default())
            .await
            .unwrap();
    assert_eq!(bookings.len(), 2);
    // Ordered by time within the day.
    assert_eq!(bookings[0].booking.time, tod("09:00"));
    assert_eq!(bookings[0].service_name, "Full Manicure");
    assert_eq!(bookings[0].client_name, "Maria Silva");
    assert_eq!(bookings[1].service_price, 40.0);
    assert_eq!(bookings[1].service_duration_min, 90);
}

#[tokio::test]
async fn dashboard_stats_count_bookings_and_revenue() {
    let fixture = seeded_repository().await;
    let today = Utc::now().date_naive();

    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            date("2099-03-02"),
            "09:00",
            BookingStatus::Completed,
        )
        .await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.pedicure.id,
            date("2099-03-02"),
            "10:00",
            BookingStatus::Completed,
        )
        .await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            today,
            "14:00",
            BookingStatus::Pending,
        )
        .await;

    let stats = dashboard_stats(&fixture.repo).await.unwrap();
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.completed_bookings, 2);
    assert_eq!(stats.today_bookings, 1);
    // 35.00 manicure + 40.00 pedicure, completed only.
    assert!((stats.total_revenue - 75.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn service_stats_group_by_category() {
    let fixture = seeded_repository().await;

    let stats = service_stats(&fixture.repo).await.unwrap();
    assert_eq!(stats.total_services, 2);
    assert_eq!(stats.active_services, 2);
    assert_eq!(stats.services_by_category.len(), 2);
    for entry in &stats.services_by_category {
        assert_eq!(entry.count, 1);
    }
}

#[tokio::test]
async fn user_stats_track_recent_clients() {
    let fixture = seeded_repository().await;
    let today = Utc::now().date_naive();

    let stats = user_stats(&fixture.repo).await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_clients, 1);
    assert_eq!(stats.total_admins, 1);
    assert_eq!(stats.active_clients, 0);

    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            today,
            "09:00",
            BookingStatus::Confirmed,
        )
        .await;

    let stats = user_stats(&fixture.repo).await.unwrap();
    assert_eq!(stats.active_clients, 1);
}
