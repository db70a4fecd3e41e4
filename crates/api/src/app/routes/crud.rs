//! Generic CRUD handlers, one router per catalog resource.
//!
//! Per-resource differences (collection, rules, ordering, search field,
//! hidden fields, gated operations) come from the [`Resource`] definition.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    routing::{delete, get, post, put, MethodRouter},
    Json, Router,
};
use serde_json::Value;

use filmoteca_catalog::{Operation, Resource};
use filmoteca_core::{document, Document, DocumentId, ID_FIELD};
use filmoteca_infra::{DeleteResult, Filter, FindQuery, InsertOneResult, UpdateResult};

use crate::app::errors::ApiError;
use crate::app::routes::system;
use crate::app::services::AppServices;
use crate::context::TokenContext;
use crate::middleware::{self, AuthState};

pub fn router(resource: Resource, auth: &AuthState) -> Router {
    let search_path = format!("/{}/:value", resource.search.segment);
    let resource = Arc::new(resource);
    let guard = |op: Operation, route: MethodRouter| guarded(&resource, auth, op, route);

    // Known paths called with an unsupported method fall through to the 404 envelope.
    Router::new()
        .route(
            "/",
            guard(Operation::List, get(list))
                .merge(guard(Operation::Create, post(create)))
                .merge(guard(Operation::Update, put(update_from_body)))
                .fallback(system::not_found),
        )
        .route(
            "/id/:id",
            guard(Operation::Get, get(get_by_id)).fallback(system::not_found),
        )
        .route(
            &search_path,
            guard(Operation::Search, get(search)).fallback(system::not_found),
        )
        .route(
            "/:id",
            guard(Operation::Update, put(update_by_id))
                .merge(guard(Operation::Delete, delete(delete_by_id)))
                .fallback(system::not_found),
        )
        .layer(Extension(resource.clone()))
}

/// Put the access-token check in front of `route` when `op` is gated.
fn guarded(resource: &Resource, auth: &AuthState, op: Operation, route: MethodRouter) -> MethodRouter {
    if resource.requires_token(op) {
        tracing::debug!(
            collection = resource.collection,
            operation = op.as_str(),
            "access token required"
        );
        route.route_layer(axum::middleware::from_fn_with_state(
            auth.clone(),
            middleware::require_token,
        ))
    } else {
        route
    }
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let mut query = FindQuery::all().excluding(resource.hidden_fields());
    if let Some(field) = resource.sort_by {
        query = query.sorted_by(field);
    }

    let docs = services
        .store()
        .find(resource.collection, &query)
        .await
        .map_err(|e| {
            ApiError::store(e, format!("Erro ao obter a listagem de {}", resource.collection), "/")
        })?;

    tracing::debug!(collection = resource.collection, count = docs.len(), "listed documents");
    Ok(Json(docs))
}

pub async fn get_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let query = FindQuery::new(Filter::Id(id))
        .excluding(resource.hidden_fields())
        .limit(1);

    let docs = services
        .store()
        .find(resource.collection, &query)
        .await
        .map_err(|e| ApiError::store(e, "Erro ao obter o documento pelo id", "/id/:id"))?;

    Ok(Json(docs))
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    Path(needle): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let mut query = FindQuery::new(Filter::contains(resource.search.field, needle))
        .excluding(resource.hidden_fields());
    if let Some(field) = resource.sort_by {
        query = query.sorted_by(field);
    }

    let docs = services
        .store()
        .find(resource.collection, &query)
        .await
        .map_err(|e| {
            ApiError::store(
                e,
                format!("Erro ao pesquisar por {}", resource.search.field),
                resource.search.segment,
            )
        })?;

    tracing::debug!(
        collection = resource.collection,
        field = resource.search.field,
        count = docs.len(),
        "searched documents"
    );
    Ok(Json(docs))
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let mut doc = document_body(body)?;
    // The store assigns the identifier.
    document::take_id(&mut doc);
    let doc = resource.rules.validate(&doc)?;

    let result = services
        .store()
        .insert_one(resource.collection, doc)
        .await
        .map_err(|e| ApiError::store(e, "Erro ao incluir o documento", "/"))?;

    tracing::info!(collection = resource.collection, id = %result.inserted_id, "document created");
    Ok(Json(result))
}

/// `PUT /<resource>/:id`
pub async fn update_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    token: Option<Extension<TokenContext>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_id(&raw_id)?;
    let mut doc = document_body(body)?;
    document::take_id(&mut doc);
    apply_update(&services, &resource, token.map(|Extension(t)| t), id, doc).await
}

/// `PUT /<resource>` with the identifier in the body's `_id`.
pub async fn update_from_body(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    token: Option<Extension<TokenContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateResult>, ApiError> {
    let mut doc = document_body(body)?;
    let raw_id = document::take_id(&mut doc).ok_or_else(|| {
        ApiError::bad_request("", "É obrigatório informar o id do documento", ID_FIELD)
    })?;
    let id = parse_id(&raw_id)?;
    apply_update(&services, &resource, token.map(|Extension(t)| t), id, doc).await
}

async fn apply_update(
    services: &AppServices,
    resource: &Resource,
    token: Option<TokenContext>,
    id: DocumentId,
    doc: Document,
) -> Result<Json<UpdateResult>, ApiError> {
    let fields = resource.rules.validate(&doc)?;

    let result = services
        .store()
        .update_one(resource.collection, id, fields)
        .await
        .map_err(|e| ApiError::store(e, "Erro ao alterar o documento", "/"))?;

    tracing::info!(
        collection = resource.collection,
        %id,
        sub = token.map(|t| t.subject().to_string()).as_deref(),
        matched = result.matched_count,
        modified = result.modified_count,
        "document updated"
    );
    Ok(Json(result))
}

pub async fn delete_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(resource): Extension<Arc<Resource>>,
    token: Option<Extension<TokenContext>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = parse_id(&raw_id)?;

    let result = services
        .store()
        .delete_one(resource.collection, id)
        .await
        .map_err(|e| ApiError::store(e, "Erro ao excluir o documento", "/:id"))?;

    tracing::info!(
        collection = resource.collection,
        %id,
        sub = token.map(|Extension(t)| t.subject().to_string()).as_deref(),
        deleted = result.deleted_count,
        "document deleted"
    );
    Ok(Json(result))
}

pub(crate) fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(raw, "Formato de id inválido", ID_FIELD))
}

/// Unwrap a JSON body that must be an object.
pub(crate) fn document_body(body: Result<Json<Value>, JsonRejection>) -> Result<Document, ApiError> {
    let Json(value) = body.map_err(|rejection| {
        ApiError::bad_request("", format!("Corpo da requisição inválido: {}", rejection.body_text()), "body")
    })?;

    document::from_value(value)
        .map_err(|e| ApiError::bad_request("", format!("Corpo da requisição inválido: {e}"), "body"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("not-an-id").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref item) if item.value == "not-an-id"));
    }

    #[test]
    fn parse_id_accepts_rendered_ids() {
        let id = DocumentId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn body_must_be_an_object() {
        assert!(document_body(Ok(Json(json!([1, 2])))).is_err());
        let doc = document_body(Ok(Json(json!({"a": 1})))).unwrap();
        assert_eq!(doc["a"], 1);
    }
}
