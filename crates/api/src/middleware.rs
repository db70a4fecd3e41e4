use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use filmoteca_auth::TokenVerifier;

use crate::app::errors::ApiError;
use crate::context::TokenContext;

/// Header carrying the access token on gated routes.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenVerifier>,
}

/// Reject the request unless it carries a valid access token.
///
/// Missing header → 401; bad signature, malformed or expired token → 403.
pub async fn require_token(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_access_token(req.headers())?;

    let claims = state.tokens.verify(token, Utc::now()).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), error = %e, "access token rejected");
        ApiError::forbidden("", format!("Token inválido: {e}"), ACCESS_TOKEN_HEADER)
    })?;

    tracing::debug!(sub = %claims.sub, "access token accepted");
    req.extensions_mut().insert(TokenContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_access_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let missing = || {
        ApiError::unauthorized(
            "Acesso negado. É necessário o token de autenticação",
            ACCESS_TOKEN_HEADER,
        )
    };

    let header = headers.get(ACCESS_TOKEN_HEADER).ok_or_else(missing)?;
    let token = header.to_str().map_err(|_| missing())?.trim();

    // Browsers send the literal string "null" when no token was stored.
    if token.is_empty() || token == "null" {
        return Err(missing());
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_or_blank_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        assert!(extract_access_token(&headers).is_err());

        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("   "));
        assert!(extract_access_token(&headers).is_err());

        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("null"));
        assert!(extract_access_token(&headers).is_err());
    }

    #[test]
    fn token_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static(" abc.def.ghi "));
        assert_eq!(extract_access_token(&headers).unwrap(), "abc.def.ghi");
    }
}
