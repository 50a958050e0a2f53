//! Beer catalog service (application-level orchestration).
//!
//! Each operation is a single call chain:
//!
//! ```text
//! request values
//!   ↓
//! 1. Stock rules that need no state (taproom-inventory)
//!   ↓
//! 2. Store read (duplicate / existence / ceiling checks)
//!   ↓
//! 3. Store write
//!   ↓
//! 4. Stored record back to the caller
//! ```
//!
//! No locking, retry or versioning happens here. Races between a duplicate check and a
//! concurrent insert, or between two increments of the same beer, are left to the store.

use thiserror::Error;
use tracing::instrument;

use taproom_core::{BeerId, DomainError};
use taproom_inventory::{ensure_positive_amount, Beer, NewBeer};

use crate::store::{BeerStore, StoreError};

/// Error returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Expected, caller-facing outcome.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unanticipated store failure; surfaced as an internal error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Beer catalog operations over any [`BeerStore`].
#[derive(Debug, Clone)]
pub struct BeerCatalog<S> {
    store: S,
}

impl<S> BeerCatalog<S>
where
    S: BeerStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new beer.
    ///
    /// Order: record invariants, negative quantity, quantity above maximum, duplicate
    /// name, insert.
    #[instrument(skip(self, beer), fields(name = %beer.name))]
    pub async fn create(&self, beer: NewBeer) -> CatalogResult<Beer> {
        beer.check_stock()?;

        if self.find_exact(&beer.name).await?.is_some() {
            return Err(duplicate_name(&beer.name).into());
        }

        let name = beer.name.clone();
        let stored = match self.store.insert(beer).await {
            Ok(stored) => stored,
            Err(StoreError::Duplicate(_)) => return Err(duplicate_name(&name).into()),
            Err(e) => {
                tracing::error!("beer insert failed: {e}");
                return Err(e.into());
            }
        };

        tracing::info!(id = %stored.id, quantity = stored.quantity, maximum = stored.maximum, "beer created");
        Ok(stored)
    }

    /// Exact, case-sensitive lookup by name.
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Beer> {
        self.find_exact(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("beer not found with name: {name}")).into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: BeerId) -> CatalogResult<Beer> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_id(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> CatalogResult<Vec<Beer>> {
        Ok(self.store.find_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: BeerId) -> CatalogResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(not_found_id(id).into());
        }
        self.store.delete_by_id(id).await?;

        tracing::info!(%id, "beer deleted");
        Ok(())
    }

    /// Add `amount` units to a beer's stock, bounded by its maximum.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: BeerId, amount: i32) -> CatalogResult<Beer> {
        ensure_positive_amount(amount)?;

        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_id(id))?;

        let next = match current.plan_increment(amount) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(quantity = current.quantity, maximum = current.maximum, "increment rejected: {e}");
                return Err(e.into());
            }
        };

        let updated = self
            .store
            .update_quantity(id, next)
            .await?
            .ok_or_else(|| not_found_id(id))?;

        tracing::info!(quantity = updated.quantity, full = updated.is_full(), "stock incremented");
        Ok(updated)
    }
}

impl<S> BeerCatalog<S>
where
    S: BeerStore,
{
    /// Case-sensitive pick among the store's candidates, whatever its collation.
    async fn find_exact(&self, name: &str) -> CatalogResult<Option<Beer>> {
        let candidates = self.store.find_by_name(name).await?;
        Ok(candidates.into_iter().find(|b| b.name == name))
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::conflict(format!("a beer named {name} already exists"))
}

fn not_found_id(id: BeerId) -> DomainError {
    DomainError::not_found(format!("beer not found with id: {id}"))
}
