//! Confirmation Code Derivation
//!
//! Codes are never stored. A code is an HMAC over the user's identity
//! plus the `code_issued_at` timestamp, so refreshing that timestamp
//! (re-signup) invalidates every previously mailed code without any
//! server-side code table.

use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

use crate::domain::entity::User;

/// Derives and verifies confirmation codes against a shared secret
#[derive(Clone)]
pub struct ConfirmationCodeIssuer {
    secret: [u8; 32],
}

impl ConfirmationCodeIssuer {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Derive the confirmation code for the user's current state
    pub fn derive(&self, user: &User) -> String {
        to_base64url(&self.mac(user))
    }

    /// Verify a presented code against the user's current state
    ///
    /// Comparison happens on the decoded MAC bytes in constant time.
    pub fn verify(&self, user: &User, presented: &str) -> bool {
        let Ok(presented_mac) = from_base64url(presented) else {
            return false;
        };
        constant_time_eq(&self.mac(user), &presented_mac)
    }

    fn mac(&self, user: &User) -> [u8; 32] {
        let mut payload = Vec::with_capacity(64);
        payload.extend_from_slice(user.user_id.as_uuid().as_bytes());
        payload.extend_from_slice(user.username.as_str().as_bytes());
        payload.extend_from_slice(user.email.as_str().as_bytes());
        payload.extend_from_slice(&user.code_issued_at.timestamp_millis().to_be_bytes());
        hmac_sha256(&self.secret, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, Username};

    fn issuer() -> ConfirmationCodeIssuer {
        ConfirmationCodeIssuer::new([7u8; 32])
    }

    fn sample_user() -> User {
        User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        )
    }

    #[test]
    fn test_derived_code_verifies() {
        let user = sample_user();
        let code = issuer().derive(&user);
        assert!(issuer().verify(&user, &code));
    }

    #[test]
    fn test_code_is_stable_for_unchanged_state() {
        let user = sample_user();
        assert_eq!(issuer().derive(&user), issuer().derive(&user));
    }

    #[test]
    fn test_refresh_invalidates_previous_code() {
        let mut user = sample_user();
        let old_code = issuer().derive(&user);
        std::thread::sleep(std::time::Duration::from_millis(2));
        user.refresh_code_state();
        assert!(!issuer().verify(&user, &old_code));
        assert!(issuer().verify(&user, &issuer().derive(&user)));
    }

    #[test]
    fn test_code_bound_to_user() {
        let alice = sample_user();
        let bob = User::new(
            Username::new("bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
        );
        let code = issuer().derive(&alice);
        assert!(!issuer().verify(&bob, &code));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = sample_user();
        let code = ConfirmationCodeIssuer::new([9u8; 32]).derive(&user);
        assert!(!issuer().verify(&user, &code));
    }

    #[test]
    fn test_garbage_input_rejected() {
        let user = sample_user();
        assert!(!issuer().verify(&user, ""));
        assert!(!issuer().verify(&user, "not base64url!!!"));
        assert!(!issuer().verify(&user, "AAAA"));
    }
}
