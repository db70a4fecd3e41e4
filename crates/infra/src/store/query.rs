//! Backend-neutral query description.

use serde_json::Value;

use filmoteca_core::{Document, DocumentId, ID_FIELD};

/// Which documents a query selects.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Every document in the collection.
    #[default]
    All,
    /// The document with this identifier.
    Id(DocumentId),
    /// Documents whose field equals the value exactly.
    FieldEq { field: String, value: Value },
    /// Documents whose string field contains `needle`, ignoring case.
    ///
    /// The needle is literal text, never a pattern.
    Contains { field: String, needle: String },
}

impl Filter {
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Evaluate the filter against a document held in memory.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => doc
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .is_some_and(|s| s == id.to_string()),
            Filter::FieldEq { field, value } => doc.get(field) == Some(value),
            Filter::Contains { field, needle } => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

/// A find request: filter, optional ascending sort, excluded fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort_by: Option<String>,
    pub exclude: Vec<String>,
    pub limit: Option<usize>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn excluding(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        filmoteca_core::document::from_value(value).unwrap()
    }

    #[test]
    fn contains_is_case_insensitive_and_literal() {
        let d = doc(json!({"title": "The Matrix (1999)"}));
        assert!(Filter::contains("title", "matrix").matches(&d));
        assert!(Filter::contains("title", "(1999)").matches(&d));
        assert!(!Filter::contains("title", "m.trix").matches(&d));
        assert!(!Filter::contains("missing", "x").matches(&d));
    }

    #[test]
    fn contains_ignores_non_strings() {
        let d = doc(json!({"year": 1999}));
        assert!(!Filter::contains("year", "1999").matches(&d));
    }

    #[test]
    fn id_filter_compares_rendered_id() {
        let id = DocumentId::new();
        let d = doc(json!({"_id": id.to_string()}));
        assert!(Filter::Id(id).matches(&d));
        assert!(!Filter::Id(DocumentId::new()).matches(&d));
    }

    #[test]
    fn field_eq_is_exact() {
        let d = doc(json!({"title": "Inception"}));
        assert!(Filter::field_eq("title", "Inception").matches(&d));
        assert!(!Filter::field_eq("title", "inception").matches(&d));
    }
}
