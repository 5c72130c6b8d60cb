//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::policy::Principal;
use crate::domain::value_object::{Email, UserRole, Username};

/// User entity
///
/// Identity plus role. There is no password: possession of a valid
/// confirmation code is the sole credential, and `code_issued_at` is part
/// of the state the code is bound to.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique handle, also the URL path segment
    pub username: Username,
    /// Unique, lowercased address the confirmation code is mailed to
    pub email: Email,
    /// Optional given name
    pub first_name: Option<String>,
    /// Optional family name
    pub last_name: Option<String>,
    /// Free-text biography
    pub bio: String,
    /// Role (User, Moderator, Admin)
    pub role: UserRole,
    /// Platform staff/superuser override; grants admin-equivalent rights
    pub is_staff: bool,
    /// Whether a confirmation code has been successfully exchanged
    pub confirmed: bool,
    /// When the current confirmation code was issued (code binding state)
    pub code_issued_at: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unconfirmed user with the explicit default role
    pub fn new(username: Username, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            first_name: None,
            last_name: None,
            bio: String::new(),
            role: UserRole::default(),
            is_staff: false,
            confirmed: false,
            code_issued_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the code-issue timestamp, invalidating outstanding codes
    pub fn refresh_code_state(&mut self) {
        let now = Utc::now();
        self.code_issued_at = now;
        self.updated_at = now;
    }

    /// Mark the account confirmed after a successful code exchange
    pub fn confirm(&mut self) {
        self.confirmed = true;
        self.updated_at = Utc::now();
    }

    /// Update user role (admin-only operation)
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// The principal this user acts as
    pub fn principal(&self) -> Principal {
        Principal::Known {
            user_id: self.user_id,
            role: self.role,
            is_staff: self.is_staff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_staff);
        assert!(!user.confirmed);
        assert!(user.bio.is_empty());
        assert!(user.first_name.is_none());
    }

    #[test]
    fn test_refresh_code_state_moves_timestamp() {
        let mut user = sample_user();
        let before = user.code_issued_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        user.refresh_code_state();
        assert!(user.code_issued_at > before);
    }

    #[test]
    fn test_confirm() {
        let mut user = sample_user();
        user.confirm();
        assert!(user.confirmed);
    }

    #[test]
    fn test_principal_carries_role_and_staff() {
        let mut user = sample_user();
        user.set_role(UserRole::Moderator);
        user.is_staff = true;

        match user.principal() {
            Principal::Known {
                user_id,
                role,
                is_staff,
            } => {
                assert_eq!(user_id, user.user_id);
                assert_eq!(role, UserRole::Moderator);
                assert!(is_staff);
            }
            Principal::Anonymous => panic!("expected a known principal"),
        }
    }
}
