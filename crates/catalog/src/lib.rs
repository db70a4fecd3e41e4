//! `filmoteca-catalog` — the resources served by the API.
//!
//! Each resource is plain data: where its documents live, how they are
//! validated, how lists are ordered and which operations need a token. The
//! HTTP layer serves all of them with one generic handler set.

pub mod movies;
pub mod providers;
pub mod resource;
pub mod users;

pub use resource::{Operation, Resource, SearchField};

/// Every resource exposed by the API.
pub fn all() -> Vec<Resource> {
    vec![movies::resource(), providers::resource(), users::resource()]
}
