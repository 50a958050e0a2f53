//! Infrastructure layer: beer stores and the catalog service that drives them.

pub mod catalog;
pub mod store;

pub use catalog::{BeerCatalog, CatalogError, CatalogResult};
pub use store::{BeerStore, InMemoryBeerStore, PostgresBeerStore, StoreError};
