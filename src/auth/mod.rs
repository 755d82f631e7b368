pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use crate::models::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, resolve_token, revoke_all_tokens};

/// Payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name, between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Must be a valid email format. Uniqueness is enforced by the database.
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for a user login request.
///
/// No length rule on the password here: any wrong password is answered with
/// the same generic 401 as an unknown email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Response body for successful registration or login: the user record plus
/// the plaintext bearer token. The token is shown here once and only its
/// hash is kept server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
