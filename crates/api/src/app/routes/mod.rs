use axum::Router;

pub mod beers;
pub mod system;

/// Router for the catalog endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/beers", beers::router())
}
