//! `filmoteca-core` — document primitives shared by every layer.
//!
//! This crate contains **pure** types (no HTTP or storage concerns).

pub mod document;
pub mod error;
pub mod id;

pub use document::{Document, ID_FIELD};
pub use error::DomainError;
pub use id::DocumentId;
