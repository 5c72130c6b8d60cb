//! Access Token Codec
//!
//! Stateless bearer tokens: `{user_id}.{expires_at_ms}.{signature}` where
//! the signature is HMAC-SHA256 over the first two segments. No token
//! table, no refresh tokens; a token is valid until its expiry.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};
use uuid::Uuid;

/// Why a presented token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not three dot-separated segments, or a segment fails to parse
    Malformed,
    /// Signature does not match the payload
    BadSignature,
    /// Expiry timestamp is in the past
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "Malformed access token"),
            Self::BadSignature => write!(f, "Invalid token signature"),
            Self::Expired => write!(f, "Access token has expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Mints and verifies HMAC-signed access tokens
#[derive(Clone)]
pub struct AccessTokenCodec {
    secret: [u8; 32],
}

impl AccessTokenCodec {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Mint a token for the user, valid for `ttl` from `now`
    pub fn mint(&self, user_id: &UserId, now: DateTime<Utc>, ttl: Duration) -> String {
        let expires_at_ms = (now + ttl).timestamp_millis();
        let payload = format!("{}.{}", user_id.as_uuid(), expires_at_ms);
        let signature = to_base64url(&hmac_sha256(&self.secret, payload.as_bytes()));
        format!("{payload}.{signature}")
    }

    /// Verify a presented token and return its subject
    ///
    /// Signature is checked before expiry so a tampered expiry cannot
    /// change the outcome.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let mut segments = token.splitn(3, '.');
        let (Some(id_part), Some(exp_part), Some(sig_part)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::Malformed);
        };

        let uuid = Uuid::parse_str(id_part).map_err(|_| TokenError::Malformed)?;
        let expires_at_ms: i64 = exp_part.parse().map_err(|_| TokenError::Malformed)?;
        let presented_sig = from_base64url(sig_part).map_err(|_| TokenError::Malformed)?;

        let payload = format!("{id_part}.{exp_part}");
        let expected_sig = hmac_sha256(&self.secret, payload.as_bytes());
        if !constant_time_eq(&expected_sig, &presented_sig) {
            return Err(TokenError::BadSignature);
        }

        if expires_at_ms < now.timestamp_millis() {
            return Err(TokenError::Expired);
        }

        Ok(UserId::from_uuid(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::new([3u8; 32])
    }

    #[test]
    fn test_mint_then_verify() {
        let user_id = UserId::new();
        let now = Utc::now();
        let token = codec().mint(&user_id, now, Duration::hours(24));
        let subject = codec().verify(&token, now).unwrap();
        assert_eq!(subject, user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let user_id = UserId::new();
        let now = Utc::now();
        let token = codec().mint(&user_id, now, Duration::hours(1));
        let later = now + Duration::hours(2);
        assert_eq!(codec().verify(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_expiry_rejected_as_bad_signature() {
        let user_id = UserId::new();
        let now = Utc::now();
        let token = codec().mint(&user_id, now, Duration::hours(1));

        let mut parts: Vec<&str> = token.splitn(3, '.').collect();
        let far_future = (now + Duration::days(365)).timestamp_millis().to_string();
        parts[1] = &far_future;
        let forged = parts.join(".");

        assert_eq!(
            codec().verify(&forged, now),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user_id = UserId::new();
        let now = Utc::now();
        let token = AccessTokenCodec::new([4u8; 32]).mint(&user_id, now, Duration::hours(1));
        assert_eq!(codec().verify(&token, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let now = Utc::now();
        assert_eq!(codec().verify("", now), Err(TokenError::Malformed));
        assert_eq!(codec().verify("a.b", now), Err(TokenError::Malformed));
        assert_eq!(
            codec().verify("not-a-uuid.123.sig", now),
            Err(TokenError::Malformed)
        );
        let uuid = Uuid::new_v4();
        assert_eq!(
            codec().verify(&format!("{uuid}.notanumber.sig"), now),
            Err(TokenError::Malformed)
        );
    }
}
