use axum::{extract::OriginalUri, http::StatusCode, Json};

use crate::app::dto::ApiInfo;
use crate::app::errors::ApiError;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}

/// Fallback for every unmatched route.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    ApiError::not_found(path.clone(), format!("A rota {path} não existe nesta API!"), "invalid route")
}
