use std::sync::Arc;

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use tokio::signal;

use filmoteca_api::app::{self, services::{AppServices, StoreHandle}};
use filmoteca_api::config::Settings;
use filmoteca_auth::Hs256Tokens;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    filmoteca_observability::init(&settings.log_level);

    let store = StoreHandle::connect(&settings).await?;
    let tokens = Hs256Tokens::new(settings.jwt_secret().as_bytes(), settings.token_ttl());
    let services = Arc::new(AppServices::new(store.shared(), tokens));

    let app = app::build_app(services, &settings);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.release().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
