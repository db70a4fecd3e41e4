use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One failed check on one field.
///
/// Serializes as `{value, msg, param, location}`, the item shape of the API's
/// error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub value: Value,
    pub msg: String,
    pub param: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(param: impl Into<String>, value: Value, msg: impl Into<String>) -> Self {
        Self {
            value,
            msg: msg.into(),
            param: param.into(),
            location: "body",
        }
    }
}

/// Every failure found while validating a document, in rule order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} field check(s) failed", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Distinct failing field names, in first-failure order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.0 {
            if !out.contains(&e.param.as_str()) {
                out.push(&e.param);
            }
        }
        out
    }
}
