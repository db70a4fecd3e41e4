//! `filmoteca-auth` — access-token issuance and verification.
//!
//! This crate is intentionally decoupled from HTTP and storage: it signs and
//! checks tokens, nothing else.

pub mod claims;
pub mod token;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use token::{Hs256Tokens, TokenError, TokenIssuer, TokenVerifier};
