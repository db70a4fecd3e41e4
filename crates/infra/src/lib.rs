//! Infrastructure layer: document storage backends.

pub mod store;

pub use store::{
    DeleteResult, DocumentStore, Filter, FindQuery, InMemoryDocumentStore, InsertOneResult,
    StoreError, StoreResult, UpdateResult,
};
#[cfg(feature = "mongodb")]
pub use store::MongoDocumentStore;
