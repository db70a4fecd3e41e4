//! Error envelope shared by every route.
//!
//! Every failure is answered as `{"errors": [{value, msg, param, location?}]}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use filmoteca_auth::TokenError;
use filmoteca_infra::StoreError;
use filmoteca_validation::ValidationErrors;

/// One entry of the error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorItem {
    pub value: Value,
    pub msg: String,
    pub param: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
}

impl ErrorItem {
    pub fn new(value: impl Into<Value>, msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            msg: msg.into(),
            param: param.into(),
            location: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {}", .0.msg)]
    BadRequest(ErrorItem),

    #[error("unauthorized: {}", .0.msg)]
    Unauthorized(ErrorItem),

    #[error("forbidden: {}", .0.msg)]
    Forbidden(ErrorItem),

    #[error("not found: {}", .0.msg)]
    NotFound(ErrorItem),

    #[error("{msg}: {source}")]
    Store {
        #[source]
        source: StoreError,
        msg: String,
        param: String,
    },

    #[error("token issuance failed: {0}")]
    Token(#[from] TokenError),
}

impl ApiError {
    pub fn bad_request(value: impl Into<Value>, msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self::BadRequest(ErrorItem::new(value, msg, param))
    }

    pub fn unauthorized(msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self::Unauthorized(ErrorItem::new("", msg, param))
    }

    pub fn forbidden(value: impl Into<Value>, msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self::Forbidden(ErrorItem::new(value, msg, param))
    }

    pub fn not_found(value: impl Into<Value>, msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self::NotFound(ErrorItem::new(value, msg, param))
    }

    pub fn store(source: StoreError, msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self::Store {
            source,
            msg: msg.into(),
            param: param.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let errors = match self {
            ApiError::Validation(errors) => json!(errors.errors()),
            ApiError::BadRequest(item)
            | ApiError::Unauthorized(item)
            | ApiError::Forbidden(item)
            | ApiError::NotFound(item) => json!([item]),
            ApiError::Store { source, msg, param } => {
                tracing::error!(error = %source, %param, "{msg}");
                json!([ErrorItem::new(source.to_string(), msg, param)])
            }
            ApiError::Token(e) => {
                tracing::error!(error = %e, "token issuance failed");
                json!([ErrorItem::new("", "Erro ao gerar o token de acesso", "access_token")])
            }
        };

        (status, Json(json!({ "errors": errors }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::bad_request("x", "m", "p").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::unauthorized("m", "p").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("", "m", "p").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("/x", "m", "p").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::store(StoreError::backend("down"), "m", "/").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn item_omits_missing_location() {
        let item = serde_json::to_value(ErrorItem::new("/foo", "nope", "invalid route")).unwrap();
        assert_eq!(item, json!({"value": "/foo", "msg": "nope", "param": "invalid route"}));
    }
}
