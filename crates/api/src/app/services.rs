//! Service wiring: picks the beer store backend and builds the catalog on top of it.

use std::sync::Arc;

use anyhow::Context;

use taproom_infra::{BeerCatalog, BeerStore, InMemoryBeerStore, PostgresBeerStore};

use crate::config::StoreConfig;

/// Catalog over a type-erased store, shared by every handler.
pub type Catalog = BeerCatalog<Arc<dyn BeerStore>>;

#[derive(Clone)]
pub struct AppServices {
    catalog: Catalog,
    store_label: &'static str,
}

impl AppServices {
    pub fn new(store: Arc<dyn BeerStore>, store_label: &'static str) -> Self {
        Self {
            catalog: BeerCatalog::new(store),
            store_label,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBeerStore::new()), StoreConfig::InMemory.label())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store_label(&self) -> &'static str {
        self.store_label
    }
}

pub async fn build_services(store: &StoreConfig) -> anyhow::Result<AppServices> {
    match store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory beer store");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pg = PostgresBeerStore::connect(database_url, *max_connections)
                .await
                .context("failed to connect to Postgres")?;
            pg.ensure_schema()
                .await
                .context("failed to prepare beers table")?;

            tracing::info!(max_connections, "using Postgres beer store");
            Ok(AppServices::new(Arc::new(pg), store.label()))
        }
    }
}
