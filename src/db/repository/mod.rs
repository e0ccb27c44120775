//! Repository trait definitions.
//!
//! Each trait covers one persistence concern; `FullRepository` is the
//! supertrait the application works against, so storage backends can be
//! swapped without touching the service or HTTP layers.

pub mod bookings;
pub mod catalog;
pub mod error;
pub mod hours;
pub mod users;

pub use bookings::BookingRepository;
pub use catalog::CatalogRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use hours::HoursRepository;
pub use users::UserRepository;

use async_trait::async_trait;

/// Combined repository interface used by the application.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait FullRepository:
    UserRepository + CatalogRepository + BookingRepository + HoursRepository
{
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
