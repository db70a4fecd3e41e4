use filmoteca_core::DocumentId;

/// Token context for a request on a gated route.
///
/// Inserted by the access-token middleware once the token has been verified.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TokenContext {
    subject: DocumentId,
}

impl TokenContext {
    pub fn new(subject: DocumentId) -> Self {
        Self { subject }
    }

    /// The document the token was issued for.
    pub fn subject(&self) -> DocumentId {
        self.subject
    }
}
