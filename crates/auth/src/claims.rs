use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use filmoteca_core::DocumentId;

/// Access-token claims.
///
/// The subject is the identifier of the document located when the token was
/// issued. Timestamps are seconds since the Unix epoch, as in any JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the located document.
    pub sub: DocumentId,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(sub: DocumentId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::token`].
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_at(now: DateTime<Utc>, ttl_secs: i64) -> TokenClaims {
        TokenClaims::new(DocumentId::new(), now, Duration::seconds(ttl_secs))
    }

    #[test]
    fn fresh_claims_are_valid() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims_at(now, 300), now), Ok(()));
    }

    #[test]
    fn expiry_is_exclusive() {
        let now = Utc::now();
        let claims = claims_at(now, 300);
        assert_eq!(
            validate_claims(&claims, now + Duration::seconds(300)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(validate_claims(&claims, now + Duration::seconds(299)), Ok(()));
    }

    #[test]
    fn future_issue_time_is_rejected() {
        let now = Utc::now();
        let claims = claims_at(now + Duration::seconds(60), 300);
        assert_eq!(validate_claims(&claims, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn empty_window_is_rejected() {
        let now = Utc::now();
        assert_eq!(
            validate_claims(&claims_at(now, 0), now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn timestamps_round_trip_to_datetimes() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = claims_at(now, 60);
        assert_eq!(claims.issued_at(), Some(now));
        assert_eq!(claims.expires_at(), Some(now + Duration::seconds(60)));
    }
}
