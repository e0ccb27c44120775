//! Aggregate statistics for the admin dashboard.
//!
//! The salon's data volumes are small, so the aggregates are computed over
//! repository listings rather than pushed down as SQL; every repository
//! backend gets them for free.

use std::collections::{HashMap, HashSet};

use chrono::{Days, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    Booking, BookingFilter, BookingStatus, ServiceCategory, ServiceFilter, ServiceId, UserFilter,
    UserRole,
};
use crate::db::repository::{
    BookingRepository, CatalogRepository, FullRepository, RepositoryResult, UserRepository,
};

/// Booking counters shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub completed_bookings: usize,
    pub today_bookings: usize,
    pub total_revenue: f64,
}

/// Catalog overview counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    pub total_services: usize,
    pub active_services: usize,
    pub services_by_category: Vec<CategoryCount>,
    pub total_revenue: f64,
}

/// Count of services in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: ServiceCategory,
    pub count: usize,
}

/// User-base overview counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub total_clients: usize,
    pub total_admins: usize,
    /// Clients with at least one booking in the last 30 days.
    pub active_clients: usize,
    pub total_revenue: f64,
}

/// Revenue over completed bookings: the sum of each completed booking's
/// service price. Prices of since-deleted services count as zero.
async fn completed_revenue(
    repo: &dyn FullRepository,
    bookings: &[Booking],
) -> RepositoryResult<f64> {
    let mut price_cache: HashMap<ServiceId, f64> = HashMap::new();
    let mut revenue = 0.0;
    for booking in bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed)
    {
        let price = match price_cache.get(&booking.service_id) {
            Some(price) => *price,
            None => {
                let price = repo
                    .fetch_service(booking.service_id)
                    .await?
                    .map(|s| s.price)
                    .unwrap_or(0.0);
                price_cache.insert(booking.service_id, price);
                price
            }
        };
        revenue += price;
    }
    Ok(revenue)
}

/// Booking statistics for the admin dashboard.
pub async fn dashboard_stats(repo: &dyn FullRepository) -> RepositoryResult<DashboardStats> {
    let bookings = repo.list_bookings(BookingFilter::default()).await?;
    let today = Utc::now().date_naive();

    Ok(DashboardStats {
        total_bookings: bookings.len(),
        pending_bookings: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count(),
        completed_bookings: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .count(),
        today_bookings: bookings.iter().filter(|b| b.date == today).count(),
        total_revenue: completed_revenue(repo, &bookings).await?,
    })
}

/// Catalog statistics.
pub async fn service_stats(repo: &dyn FullRepository) -> RepositoryResult<ServiceStats> {
    let services = repo.list_services(ServiceFilter::default()).await?;
    let bookings = repo.list_bookings(BookingFilter::default()).await?;

    let mut by_category: HashMap<ServiceCategory, usize> = HashMap::new();
    for service in &services {
        *by_category.entry(service.category).or_default() += 1;
    }
    let mut services_by_category: Vec<CategoryCount> = by_category
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    services_by_category.sort_by_key(|c| c.category.as_str());

    Ok(ServiceStats {
        total_services: services.len(),
        active_services: services.iter().filter(|s| s.is_active).count(),
        services_by_category,
        total_revenue: completed_revenue(repo, &bookings).await?,
    })
}

/// User-base statistics.
pub async fn user_stats(repo: &dyn FullRepository) -> RepositoryResult<UserStats> {
    let users = repo.list_users(UserFilter::default()).await?;
    let bookings = repo.list_bookings(BookingFilter::default()).await?;

    let cutoff = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(30))
        .unwrap_or(Utc::now().date_naive());
    let recently_booked: HashSet<_> = bookings
        .iter()
        .filter(|b| b.date >= cutoff)
        .map(|b| b.client_id)
        .collect();

    Ok(UserStats {
        total_users: users.len(),
        total_clients: users.iter().filter(|u| u.role == UserRole::Client).count(),
        total_admins: users.iter().filter(|u| u.role == UserRole::Admin).count(),
        active_clients: users
            .iter()
            .filter(|u| u.role == UserRole::Client && recently_booked.contains(&u.id))
            .count(),
        total_revenue: completed_revenue(repo, &bookings).await?,
    })
}
