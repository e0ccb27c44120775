//! Shared fixtures for integration tests.

use chrono::NaiveDate;
use salon_rust::api::{
    BookingStatus, NewBooking, NewService, NewUser, ServiceCategory, ServiceId, ServiceOffering,
    UserAccount, UserId, UserRole,
};
use salon_rust::db::repositories::LocalRepository;
use salon_rust::db::repository::{
    BookingRepository, CatalogRepository, HoursRepository, UserRepository,
};
use salon_rust::models::TimeOfDay;

pub fn tod(s: &str) -> TimeOfDay {
    s.parse().expect("fixture time literal")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date literal")
}

/// A repository pre-populated with the accounts and catalog the flows need.
pub struct Seeded {
    pub repo: LocalRepository,
    pub admin: UserAccount,
    pub client: UserAccount,
    /// 60-minute manicure
    pub manicure: ServiceOffering,
    /// 90-minute pedicure
    pub pedicure: ServiceOffering,
}

/// Build a repository with an admin, a client and two active services.
/// No opening hours are configured; tests add the windows they need.
pub async fn seeded_repository() -> Seeded {
    let repo = LocalRepository::new();

    let admin = repo
        .insert_user(NewUser {
            name: "Isabela".to_string(),
            email: "admin@salon.test".to_string(),
            phone: "555-0001".to_string(),
            password_hash: "unused-hash".to_string(),
            role: UserRole::Admin,
        })
        .await
        .expect("seed admin");

    let client = repo
        .insert_user(NewUser {
            name: "Maria Silva".to_string(),
            email: "client@salon.test".to_string(),
            phone: "555-0002".to_string(),
            password_hash: "unused-hash".to_string(),
            role: UserRole::Client,
        })
        .await
        .expect("seed client");

    let manicure = repo
        .insert_service(NewService {
            name: "Full Manicure".to_string(),
            description: "Cuticle care, filing and polish".to_string(),
            price: 35.0,
            duration_min: 60,
            category: ServiceCategory::Manicure,
            is_active: true,
        })
        .await
        .expect("seed manicure");

    let pedicure = repo
        .insert_service(NewService {
            name: "Full Pedicure".to_string(),
            description: "Cuticle care, filing and polish".to_string(),
            price: 40.0,
            duration_min: 90,
            category: ServiceCategory::Pedicure,
            is_active: true,
        })
        .await
        .expect("seed pedicure");

    Seeded {
        repo,
        admin,
        client,
        manicure,
        pedicure,
    }
}

impl Seeded {
    /// Add a recurring window for a weekday (0 = Sunday).
    pub async fn open_hours(&self, weekday: u8, start: &str, end: &str) {
        self.repo
            .insert_working_hour(weekday, tod(start), tod(end))
            .await
            .expect("seed working hour");
    }

    /// Insert a booking directly, bypassing the creation flow's checks.
    pub async fn raw_booking(
        &self,
        client: UserId,
        service: ServiceId,
        on: NaiveDate,
        at: &str,
        status: BookingStatus,
    ) -> salon_rust::api::Booking {
        self.repo
            .insert_booking(NewBooking {
                client_id: client,
                service_id: service,
                date: on,
                time: tod(at),
                status,
                notes: None,
                created_by: UserRole::Admin,
            })
            .await
            .expect("seed booking")
    }
}
