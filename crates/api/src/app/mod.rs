//! HTTP application wiring (Axum router + shared services).
//!
//! - `services.rs`: store backend and token wiring
//! - `routes/`: HTTP handlers (generic CRUD plus the movie registration)
//! - `dto.rs`: response bodies that are not plain documents
//! - `errors.rs`: the `{errors: [...]}` envelope

use std::sync::Arc;

use axum::{Extension, Router};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// HTTP service with trailing slashes trimmed before routing.
pub type App = NormalizePath<Router>;

/// Build the full HTTP service (public entrypoint used by `main.rs`).
///
/// Serve it with `axum::ServiceExt::<Request>::into_make_service`.
pub fn build_app(services: Arc<AppServices>, settings: &Settings) -> App {
    let auth = AuthState {
        tokens: services.verifier(),
    };

    let app = routes::public_router()
        .nest("/api", routes::router(&auth))
        .fallback(routes::system::not_found);

    let app = if settings.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(services)),
    );

    // `/api/filmes/` routes like `/api/filmes`.
    NormalizePathLayer::trim_trailing_slash().layer(app)
}
