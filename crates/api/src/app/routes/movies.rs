//! `POST /filme/cadastro`: look a movie up and issue an access token for it.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;

use filmoteca_catalog::movies;
use filmoteca_core::document;
use filmoteca_infra::{Filter, FindQuery, StoreError};

use crate::app::dto::RegistrationResponse;
use crate::app::errors::ApiError;
use crate::app::routes::crud::document_body;
use crate::app::routes::system;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/cadastro", post(register).fallback(system::not_found))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let body = movies::registration_rules().validate(&document_body(body)?)?;
    let title = body.get(movies::TITLE).cloned().unwrap_or(Value::Null);
    let year = body.get(movies::YEAR).cloned().unwrap_or(Value::Null);

    let query = FindQuery::new(Filter::field_eq(movies::TITLE, title.clone())).limit(1);
    let found = services
        .store()
        .find(movies::COLLECTION, &query)
        .await
        .map_err(|e| ApiError::store(e, "Erro ao localizar o filme", "/cadastro"))?;

    let Some(movie) = found.into_iter().next() else {
        tracing::debug!(%title, "registration for unknown movie");
        return Err(ApiError::not_found(title, movies::NOT_REGISTERED, movies::TITLE));
    };

    if !movies::year_matches(&movie, &year) {
        tracing::warn!(%title, "registration year mismatch");
        return Err(ApiError::forbidden(year, movies::YEAR_MISMATCH, movies::YEAR));
    }

    let subject = document::id_of(&movie).ok_or_else(|| {
        ApiError::store(
            StoreError::corrupt("stored movie has no valid _id"),
            "Erro ao localizar o filme",
            "/cadastro",
        )
    })?;

    let access_token = services.issuer().issue(subject, Utc::now())?;
    tracing::info!(sub = %subject, "access token issued");

    Ok(Json(RegistrationResponse {
        message: movies::REGISTERED,
        access_token,
    }))
}
