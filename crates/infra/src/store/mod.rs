//! Beer persistence: the store contract and its backends.
//!
//! The catalog service depends only on [`BeerStore`]. Backends:
//! - [`InMemoryBeerStore`]: dev/tests.
//! - [`PostgresBeerStore`]: SQLx-backed, used when persistent stores are enabled.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use taproom_core::BeerId;
use taproom_inventory::{Beer, NewBeer};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryBeerStore;
pub use postgres::PostgresBeerStore;

/// Store operation error.
///
/// These are **infrastructure errors**, as opposed to the domain outcomes in
/// `taproom_core::DomainError`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. concurrent insert of the same name).
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// The backend could not be reached (pool closed, connection refused, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure, including rows that no longer decode.
    #[error("store failure: {0}")]
    Backend(String),
}

/// Beer store keyed by id, with a secondary lookup by name.
///
/// Name lookups follow the backend's collation and may return several candidates (e.g.
/// `Heineken` and `heineken` under a case-insensitive one). Callers that need an exact
/// match pick it from the candidates.
#[async_trait]
pub trait BeerStore: Send + Sync {
    /// Persist a new beer and assign its identifier.
    async fn insert(&self, beer: NewBeer) -> Result<Beer, StoreError>;

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, StoreError>;

    /// Every beer whose name the backend matches against `name`.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Beer>, StoreError>;

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, StoreError>;

    /// Remove a beer. Removing an unknown id is a no-op.
    async fn delete_by_id(&self, id: BeerId) -> Result<(), StoreError>;

    /// All beers, in insertion order.
    async fn find_all(&self) -> Result<Vec<Beer>, StoreError>;

    /// Overwrite the stored quantity. Returns `None` if the beer no longer exists.
    async fn update_quantity(&self, id: BeerId, quantity: i32) -> Result<Option<Beer>, StoreError>;
}

#[async_trait]
impl<S> BeerStore for Arc<S>
where
    S: BeerStore + ?Sized,
{
    async fn insert(&self, beer: NewBeer) -> Result<Beer, StoreError> {
        (**self).insert(beer).await
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Beer>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, StoreError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), StoreError> {
        (**self).delete_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Beer>, StoreError> {
        (**self).find_all().await
    }

    async fn update_quantity(&self, id: BeerId, quantity: i32) -> Result<Option<Beer>, StoreError> {
        (**self).update_quantity(id, quantity).await
    }
}
