//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC signing of tokens and confirmation codes (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token TTL (24 hours by default)
    pub token_ttl: Duration,
    /// Sender shown in confirmation mails
    pub mail_from: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::hours(24),
            mail_from: "noreply@reviews.local".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    ///
    /// Tokens do not survive a restart with a random secret.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Derive config from an arbitrary-length secret string
    ///
    /// The string (e.g. the `AUTH_TOKEN_SECRET` environment variable) is
    /// hashed down to the fixed key size.
    pub fn from_secret_str(secret: &str) -> Self {
        Self {
            token_secret: platform::crypto::sha256(secret.as_bytes()),
            ..Default::default()
        }
    }
}
