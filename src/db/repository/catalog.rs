//! Service catalog repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewService, ServiceChanges, ServiceFilter, ServiceId, ServiceOffering};

/// Repository trait for the service catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a new service and return it with its assigned id.
    async fn insert_service(&self, service: NewService) -> RepositoryResult<ServiceOffering>;

    /// Fetch a service by id.
    async fn fetch_service(&self, id: ServiceId) -> RepositoryResult<Option<ServiceOffering>>;

    /// List services matching the filter, ordered by name.
    async fn list_services(&self, filter: ServiceFilter) -> RepositoryResult<Vec<ServiceOffering>>;

    /// Apply changes to a service. Fails with `NotFound` for unknown ids.
    async fn update_service(
        &self,
        id: ServiceId,
        changes: ServiceChanges,
    ) -> RepositoryResult<ServiceOffering>;

    /// Delete a service. Fails with `NotFound` for unknown ids.
    ///
    /// Services with past bookings may be deleted; historical bookings keep
    /// their denormalized name and price in listings until they are purged.
    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()>;
}
