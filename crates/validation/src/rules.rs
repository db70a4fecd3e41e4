//! Field rules and rule sets.

use std::borrow::Cow;

use serde_json::Value;

use filmoteca_core::Document;
use filmoteca_core::document::scalar_text;

use crate::check::Check;
use crate::error::{FieldError, ValidationErrors};

const DEFAULT_MESSAGE: &str = "Invalid value";

/// Whether a field must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Presence {
    /// Missing, `null` or blank values fail with the given message.
    Required(Cow<'static, str>),
    /// Missing or `null` values skip every check.
    Optional,
}

/// Ordered checks for a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    presence: Presence,
    trim: bool,
    checks: Vec<(Check, Cow<'static, str>)>,
}

impl FieldRule {
    pub fn required(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            presence: Presence::Required(message.into()),
            trim: true,
            checks: Vec::new(),
        }
    }

    pub fn optional(field: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            trim: false,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.push((check, message.into()));
        self
    }

    pub fn numeric(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Numeric, message)
    }

    pub fn alphanumeric(self, ignore: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Alphanumeric { ignore }, message)
    }

    pub fn length(self, min: usize, max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::length(min, max), message)
    }

    pub fn custom(
        self,
        name: &'static str,
        predicate: fn(&str) -> bool,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.check(Check::Custom { name, predicate }, message)
    }

    /// Evaluate this rule, pushing failures into `errors`.
    ///
    /// Returns the sanitized value to store, if it differs from the input.
    fn evaluate(&self, raw: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<Value> {
        let raw = match raw {
            None | Some(Value::Null) => {
                if let Presence::Required(msg) = &self.presence {
                    errors.push(FieldError::body(self.field, Value::from(""), msg.clone()));
                }
                return None;
            }
            Some(v) => v,
        };

        let Some(text) = scalar_text(raw) else {
            // Arrays and objects have no text form and fail every check.
            if self.checks.is_empty() {
                let msg = match &self.presence {
                    Presence::Required(msg) => msg.clone(),
                    Presence::Optional => Cow::Borrowed(DEFAULT_MESSAGE),
                };
                errors.push(FieldError::body(self.field, raw.clone(), msg));
            }
            for (_, msg) in &self.checks {
                errors.push(FieldError::body(self.field, raw.clone(), msg.clone()));
            }
            return None;
        };

        let text = if self.trim { text.trim().to_string() } else { text };
        let reported = match raw {
            Value::String(_) => Value::String(text.clone()),
            other => other.clone(),
        };

        if let Presence::Required(msg) = &self.presence {
            if text.is_empty() {
                errors.push(FieldError::body(self.field, reported, msg.clone()));
                return None;
            }
        }

        for (check, msg) in &self.checks {
            if !check.passes(&text) {
                errors.push(FieldError::body(self.field, reported.clone(), msg.clone()));
            }
        }

        match raw {
            Value::String(s) if self.trim && s.as_str() != text => Some(Value::String(text)),
            _ => None,
        }
    }
}

/// Ordered collection of field rules.
///
/// Fields not named by any rule pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Validate a document.
    ///
    /// On success returns a sanitized copy (trimmed strings). On failure
    /// returns every failing check of every field, in rule order.
    pub fn validate(&self, doc: &Document) -> Result<Document, ValidationErrors> {
        let mut errors = Vec::new();
        let mut sanitized = doc.clone();

        for rule in &self.rules {
            if let Some(value) = rule.evaluate(doc.get(rule.field), &mut errors) {
                sanitized.insert(rule.field.to_string(), value);
            }
        }

        if errors.is_empty() {
            Ok(sanitized)
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}
