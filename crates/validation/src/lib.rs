//! `filmoteca-validation` — declarative field rules for incoming documents.
//!
//! A [`RuleSet`] is an ordered list of [`FieldRule`]s, each pairing predicates
//! with the message reported when they fail. Evaluation is pure: it never
//! touches the input and returns either a sanitized copy of the document or
//! every failure found.

pub mod check;
pub mod error;
pub mod rules;

pub use check::Check;
pub use error::{FieldError, ValidationErrors};
pub use rules::{FieldRule, RuleSet};
