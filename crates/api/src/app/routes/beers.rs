use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, OriginalUri, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use taproom_core::BeerId;
use taproom_inventory::{validate_draft, validate_increment};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_beers).post(create_beer))
        .route("/name/:name", get(get_beer_by_name))
        .route("/:id", get(get_beer).delete(delete_beer))
        .route("/:id/increment", patch(increment_stock))
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<dto::CreateBeerRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => return errors::json_rejection_to_response(rejection, uri.path()),
    };

    let new_beer = match validate_draft(body.into()) {
        Ok(b) => b,
        Err(e) => return errors::validation_errors_to_response(&e, uri.path()),
    };

    match services.catalog().create(new_beer).await {
        Ok(beer) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/api/beers/{}", beer.id))],
            Json(dto::BeerResponse::from(beer)),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}

pub async fn list_beers(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
) -> axum::response::Response {
    match services.catalog().list_all().await {
        Ok(beers) => {
            let body: Vec<dto::BeerResponse> = beers.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}

pub async fn get_beer_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.catalog().get_by_name(&name).await {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}

pub async fn get_beer(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id(uri.path()),
    };

    match services.catalog().get(id).await {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id(uri.path()),
    };

    match services.catalog().delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    payload: Result<Json<dto::IncrementStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id(uri.path()),
    };

    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => return errors::json_rejection_to_response(rejection, uri.path()),
    };

    let amount = match validate_increment(body.quantity) {
        Ok(v) => v,
        Err(e) => return errors::validation_errors_to_response(&e, uri.path()),
    };

    match services.catalog().increment(id, amount).await {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::catalog_error_to_response(e, uri.path()),
    }
}
