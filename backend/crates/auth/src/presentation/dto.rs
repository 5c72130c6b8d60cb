//! API DTOs (Data Transfer Objects)
//!
//! Wire field names are snake_case throughout the API.

use serde::{Deserialize, Serialize};

use crate::domain::entity::User;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
}

/// Sign up response (echoes the accepted pair)
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub username: String,
    pub email: String,
}

// ============================================================================
// Token Exchange
// ============================================================================

/// Token request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

/// Token response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

/// User representation shared by the admin and `me` endpoints
///
/// Absent name parts serialize as empty strings, not null.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username.to_string(),
            email: user.email.to_string(),
            first_name: user.first_name.unwrap_or_default(),
            last_name: user.last_name.unwrap_or_default(),
            bio: user.bio,
            role: user.role.code().to_string(),
        }
    }
}

/// Paginated user listing
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub count: i64,
    pub results: Vec<UserResponse>,
}

/// Admin user creation request
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCreateUserRequest {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Admin user patch request; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Self-service patch request; role is not self-editable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, Username};

    #[test]
    fn test_user_response_blank_names() {
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        let dto = UserResponse::from(user);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["first_name"], "");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_me_update_request_ignores_role() {
        let req: MeUpdateRequest =
            serde_json::from_str(r#"{"bio": "hi", "role": "admin"}"#).unwrap();
        assert_eq!(req.bio.as_deref(), Some("hi"));
    }
}
