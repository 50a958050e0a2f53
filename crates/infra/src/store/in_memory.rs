use std::sync::RwLock;

use async_trait::async_trait;

use taproom_core::BeerId;
use taproom_inventory::{Beer, NewBeer};

use super::{BeerStore, StoreError};

/// In-memory beer store.
///
/// Intended for tests/dev. Records are kept in insertion order; lookups are linear.
#[derive(Debug, Default)]
pub struct InMemoryBeerStore {
    rows: RwLock<Vec<Beer>>,
}

impl InMemoryBeerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Beer>>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Beer>>, StoreError> {
        self.rows
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BeerStore for InMemoryBeerStore {
    async fn insert(&self, beer: NewBeer) -> Result<Beer, StoreError> {
        let mut rows = self.write()?;

        // Mirrors the unique index the Postgres schema carries.
        if rows.iter().any(|b| b.name == beer.name) {
            return Err(StoreError::Duplicate(format!("name: {}", beer.name)));
        }

        let stored = Beer::from_new(BeerId::new(), beer);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, StoreError> {
        Ok(self.read()?.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Beer>, StoreError> {
        Ok(self.read()?.iter().filter(|b| b.name == name).cloned().collect())
    }

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, StoreError> {
        Ok(self.read()?.iter().any(|b| b.id == id))
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), StoreError> {
        self.write()?.retain(|b| b.id != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Beer>, StoreError> {
        Ok(self.read()?.clone())
    }

    async fn update_quantity(&self, id: BeerId, quantity: i32) -> Result<Option<Beer>, StoreError> {
        let mut rows = self.write()?;
        Ok(rows.iter_mut().find(|b| b.id == id).map(|b| {
            b.quantity = quantity;
            b.clone()
        }))
    }
}
