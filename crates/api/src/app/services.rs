use std::sync::Arc;

#[cfg(feature = "mongodb")]
use anyhow::Context;

use filmoteca_auth::{Hs256Tokens, TokenIssuer, TokenVerifier};
use filmoteca_infra::{DocumentStore, InMemoryDocumentStore};
#[cfg(feature = "mongodb")]
use filmoteca_infra::MongoDocumentStore;

use crate::config::Settings;

/// Collaborators shared by every handler.
pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    issuer: Arc<dyn TokenIssuer>,
    verifier: Arc<dyn TokenVerifier>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Hs256Tokens) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            store,
            issuer: tokens.clone(),
            verifier: tokens,
        }
    }

    /// Services over a fresh, empty in-memory store.
    pub fn in_memory(tokens: Hs256Tokens) -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()), tokens)
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn issuer(&self) -> &dyn TokenIssuer {
        self.issuer.as_ref()
    }

    pub fn verifier(&self) -> Arc<dyn TokenVerifier> {
        self.verifier.clone()
    }
}

/// The store backend opened at startup.
///
/// Held by `main` for the process lifetime and released after the server has
/// drained.
pub enum StoreHandle {
    InMemory(Arc<InMemoryDocumentStore>),
    #[cfg(feature = "mongodb")]
    Mongo(Arc<MongoDocumentStore>),
}

impl StoreHandle {
    /// MongoDB when `database_url` is configured, in-memory otherwise.
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let Some(url) = settings.database_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            tracing::warn!("database_url not set; using in-memory store (data is lost on exit)");
            return Ok(Self::InMemory(Arc::new(InMemoryDocumentStore::new())));
        };

        Self::connect_mongo(url, &settings.database_name).await
    }

    #[cfg(feature = "mongodb")]
    async fn connect_mongo(url: &str, database: &str) -> anyhow::Result<Self> {
        let store = MongoDocumentStore::connect(url, database)
            .await
            .with_context(|| format!("failed to connect to MongoDB database {database}"))?;
        Ok(Self::Mongo(Arc::new(store)))
    }

    #[cfg(not(feature = "mongodb"))]
    async fn connect_mongo(_url: &str, _database: &str) -> anyhow::Result<Self> {
        anyhow::bail!("database_url is set but this build has no MongoDB support (feature `mongodb`)")
    }

    pub fn shared(&self) -> Arc<dyn DocumentStore> {
        match self {
            StoreHandle::InMemory(store) => store.clone(),
            #[cfg(feature = "mongodb")]
            StoreHandle::Mongo(store) => store.clone(),
        }
    }

    pub async fn release(self) {
        match self {
            StoreHandle::InMemory(_) => {}
            #[cfg(feature = "mongodb")]
            StoreHandle::Mongo(store) => store.shutdown().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unset_database_url_falls_back_to_memory() {
        let handle = StoreHandle::connect(&Settings::default()).await.unwrap();
        assert!(matches!(handle, StoreHandle::InMemory(_)));
        handle.release().await;
    }

    #[tokio::test]
    async fn blank_database_url_falls_back_to_memory() {
        let settings = Settings {
            database_url: Some("  ".into()),
            ..Settings::default()
        };
        let handle = StoreHandle::connect(&settings).await.unwrap();
        assert!(matches!(handle, StoreHandle::InMemory(_)));
    }
}
