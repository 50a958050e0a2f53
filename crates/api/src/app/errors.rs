use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

use taproom_core::DomainError;
use taproom_infra::CatalogError;
use taproom_inventory::ValidationErrors;

pub fn catalog_error_to_response(err: CatalogError, path: &str) -> axum::response::Response {
    match err {
        CatalogError::Domain(e) => domain_error_to_response(e, path),
        CatalogError::Store(e) => {
            tracing::error!(%path, "store failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string(), path)
        }
    }
}

pub fn domain_error_to_response(err: DomainError, path: &str) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg, path),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg, path),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg, path),
        e @ DomainError::CapacityExceeded { .. } => {
            json_error(StatusCode::BAD_REQUEST, "capacity_exceeded", e.to_string(), path)
        }
    }
}

pub fn validation_errors_to_response(errors: &ValidationErrors, path: &str) -> axum::response::Response {
    let fields: Vec<_> = errors
        .fields()
        .iter()
        .map(|e| json!({ "field": e.field, "message": e.message }))
        .collect();

    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "status": StatusCode::BAD_REQUEST.as_u16(),
            "error": "validation_error",
            "message": errors.to_string(),
            "path": path,
            "timestamp": Utc::now().to_rfc3339(),
            "fields": fields,
        })),
    )
        .into_response()
}

pub fn json_rejection_to_response(rejection: JsonRejection, path: &str) -> axum::response::Response {
    match rejection {
        JsonRejection::MissingJsonContentType(e) => json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            e.body_text(),
            path,
        ),
        other => json_error(
            StatusCode::BAD_REQUEST,
            "malformed_json",
            format!("request body is malformed or has invalid types: {}", other.body_text()),
            path,
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    path: &str,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status": status.as_u16(),
            "error": code,
            "message": message.into(),
            "path": path,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

pub fn invalid_id(path: &str) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid beer id", path)
}
