//! Booking creation and lifecycle rules.

mod support;

use salon_rust::api::{BookingStatus, ServiceChanges, ServiceId, UserRole};
use salon_rust::db::repository::RepositoryError;
use salon_rust::db::services as db_services;
use salon_rust::services::{create_booking, BookingRequest};
use support::{date, seeded_repository, tod};

const MONDAY: &str = "2099-02-02";

fn request(service: ServiceId, at: &str) -> BookingRequest {
    BookingRequest {
        service_id: service,
        date: date(MONDAY),
        time: tod(at),
        notes: None,
        status: None,
    }
}

#[tokio::test]
async fn client_booking_defaults_to_pending() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;

    let detail = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap();

    assert_eq!(detail.booking.status, BookingStatus::Pending);
    assert_eq!(detail.booking.created_by, UserRole::Client);
    assert_eq!(detail.service_name, "Full Manicure");
    assert_eq!(detail.client_name, "Maria Silva");
}

#[tokio::test]
async fn admin_booking_defaults_to_confirmed() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;

    let detail = create_booking(
        &fixture.repo,
        fixture.admin.id,
        UserRole::Admin,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap();

    assert_eq!(detail.booking.status, BookingStatus::Confirmed);
    assert_eq!(detail.booking.created_by, UserRole::Admin);
}

#[tokio::test]
async fn taken_slot_is_rejected() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            date(MONDAY),
            "10:00",
            BookingStatus::Pending,
        )
        .await;

    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn slot_covered_by_an_earlier_booking_is_rejected() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;
    // The 90-minute pedicure at 10:00 spans 10:00-11:30.
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.pedicure.id,
            date(MONDAY),
            "10:00",
            BookingStatus::Confirmed,
        )
        .await;

    // 11:00 is inside that span even though no booking starts there.
    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "11:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn booking_outside_open_hours_is_rejected() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "12:00").await;

    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "14:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn booking_that_would_overrun_closing_is_rejected() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "12:00").await;

    // 11:30 + 60 minutes runs past the 12:00 close.
    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "11:30"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // 11:00 fits exactly.
    create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "11:00"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn inactive_service_cannot_be_booked() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;
    db_services::update_service(
        &fixture.repo,
        fixture.manicure.id,
        ServiceChanges {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;

    let err = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(ServiceId::new(42_000), "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn cancelling_frees_the_slot_for_rebooking() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;

    let detail = create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap();

    db_services::cancel_booking(&fixture.repo, detail.booking.id)
        .await
        .unwrap();

    // The same slot can be booked again.
    create_booking(
        &fixture.repo,
        fixture.client.id,
        UserRole::Client,
        request(fixture.manicure.id, "10:00"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn only_active_bookings_can_be_cancelled() {
    let fixture = seeded_repository().await;
    let booking = fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            date(MONDAY),
            "10:00",
            BookingStatus::Completed,
        )
        .await;

    let err = db_services::cancel_booking(&fixture.repo, booking.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn explicit_status_overrides_the_default() {
    let fixture = seeded_repository().await;
    fixture.open_hours(1, "09:00", "18:00").await;

    let detail = create_booking(
        &fixture.repo,
        fixture.admin.id,
        UserRole::Admin,
        BookingRequest {
            status: Some(BookingStatus::Pending),
            ..request(fixture.manicure.id, "10:00")
        },
    )
    .await
    .unwrap();
    assert_eq!(detail.booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn users_with_bookings_cannot_be_deleted() {
    let fixture = seeded_repository().await;
    fixture
        .raw_booking(
            fixture.client.id,
            fixture.manicure.id,
            date(MONDAY),
            "10:00",
            BookingStatus::Pending,
        )
        .await;

    let err = db_services::delete_user(&fixture.repo, fixture.client.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // The admin has no bookings and can be deleted.
    db_services::delete_user(&fixture.repo, fixture.admin.id)
        .await
        .unwrap();
}
