//! Document store boundary.
//!
//! Handlers talk to a [`DocumentStore`]; the process picks one backend at
//! startup (in-memory for dev/tests, MongoDB in production) and shares it for
//! its whole lifetime.

pub mod in_memory;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoDocumentStore;
pub use query::{Filter, FindQuery};
pub use r#trait::{
    DeleteResult, DocumentStore, InsertOneResult, StoreError, StoreResult, UpdateResult,
};
