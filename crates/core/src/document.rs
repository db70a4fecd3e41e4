//! Schemaless documents.
//!
//! A document is a plain JSON object. The only field with meaning at this
//! level is [`ID_FIELD`], which always holds the server-assigned
//! [`DocumentId`] rendered as a string.

use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::id::DocumentId;

/// Name of the identifier field.
pub const ID_FIELD: &str = "_id";

/// A stored (or to-be-stored) document.
pub type Document = Map<String, Value>;

/// Interpret a request body as a document.
pub fn from_value(value: Value) -> Result<Document, DomainError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::malformed(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Remove the identifier from a document, returning it if it was present.
///
/// The returned string is the raw client-supplied value; it is not parsed.
pub fn take_id(doc: &mut Document) -> Option<String> {
    match doc.remove(ID_FIELD)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Parse the identifier stored in a document.
pub fn id_of(doc: &Document) -> Option<DocumentId> {
    doc.get(ID_FIELD)?.as_str()?.parse().ok()
}

/// Stamp a document with its identifier, replacing whatever was there.
pub fn with_id(mut doc: Document, id: DocumentId) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

/// Render a scalar field as text.
///
/// Strings are returned as-is, numbers and booleans via their JSON form.
/// `null`, arrays and objects have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
