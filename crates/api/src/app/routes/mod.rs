use axum::{routing::get, Router};

use crate::middleware::AuthState;

pub mod crud;
pub mod movies;
pub mod system;

/// Router for everything under `/api`.
pub fn router(auth: &AuthState) -> Router {
    filmoteca_catalog::all()
        .into_iter()
        .fold(Router::new(), |router, resource| {
            let path = format!("/{}", resource.path);
            router.nest(&path, crud::router(resource, auth))
        })
        .nest("/filme", movies::router())
}

/// Routes outside `/api`.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health).fallback(system::not_found))
        .route("/api", get(system::api_info).fallback(system::not_found))
}
