//! HS256 access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use filmoteca_core::DocumentId;

use crate::claims::{TokenClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("malformed or tampered token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Issues a signed credential for a located document.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: DocumentId, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Checks a credential presented on a gated route.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// Shared-secret HS256 implementation of both sides.
#[derive(Clone)]
pub struct Hs256Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256Tokens {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        // Time claims are checked by `validate_claims` against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl core::fmt::Debug for Hs256Tokens {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Tokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for Hs256Tokens {
    fn issue(&self, subject: DocumentId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::new(subject, now, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        tracing::debug!(sub = %subject, exp = claims.exp, "issued access token");
        Ok(token)
    }
}

impl TokenVerifier for Hs256Tokens {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> Hs256Tokens {
        Hs256Tokens::new(secret.as_bytes(), Duration::seconds(300))
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let t = tokens("s3cret");
        let id = DocumentId::new();
        let now = Utc::now();
        let token = t.issue(id, now).unwrap();

        let claims = t.verify(&token, now).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = tokens("one").issue(DocumentId::new(), Utc::now()).unwrap();
        let err = tokens("two").verify(&token, Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let t = tokens("s3cret");
        let now = Utc::now();
        let token = t.issue(DocumentId::new(), now).unwrap();
        let err = t.verify(&token, now + Duration::seconds(301)).unwrap_err();
        assert_eq!(err, TokenError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = tokens("s3cret").verify("not.a.token", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let rendered = format!("{:?}", tokens("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
