use filmoteca_validation::RuleSet;

/// CRUD operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Search,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Search => "search",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Field searched by `GET /<resource>/<segment>/:value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    /// Path segment, e.g. `title` in `/filmes/title/:title`.
    pub segment: &'static str,
    /// Document field matched (case-insensitive substring).
    pub field: &'static str,
}

/// A document collection served over HTTP.
#[derive(Debug, Clone)]
pub struct Resource {
    /// URL segment under `/api`.
    pub path: &'static str,
    pub collection: &'static str,
    pub rules: RuleSet,
    /// Ascending sort field for list responses.
    pub sort_by: Option<&'static str>,
    pub search: SearchField,
    /// Fields never returned by reads.
    pub hidden: &'static [&'static str],
    /// Operations that require a valid `access-token`.
    pub gated: &'static [Operation],
}

impl Resource {
    pub fn requires_token(&self, op: Operation) -> bool {
        self.gated.contains(&op)
    }

    pub fn hidden_fields(&self) -> Vec<String> {
        self.hidden.iter().map(|f| f.to_string()).collect()
    }
}
