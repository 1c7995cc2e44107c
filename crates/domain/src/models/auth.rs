//! Authentication request/response models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponse;

/// Request body for registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username harus 3-50 karakter"))]
    pub username: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: String,
}

/// Request body for login.
///
/// The `identifier` field accepts either a username or an email address.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username atau email wajib diisi"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password wajib diisi"))]
    pub password: String,
}

/// Successful authentication payload: the account plus a fresh bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn new(user: UserResponse, token: String) -> Self {
        Self {
            user,
            token,
            token_type: "Bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            username: "sari".to_string(),
            email: "sari@bps.go.id".to_string(),
            password: "delapan-karakter".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            username: "sari".to_string(),
            email: "bukan-email".to_string(),
            password: "delapan-karakter".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let request = RegisterRequest {
            username: "sari".to_string(),
            email: "sari@bps.go.id".to_string(),
            password: "pendek".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_empty_identifier() {
        let request = LoginRequest {
            identifier: "".to_string(),
            password: "apapun".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_auth_response_token_type() {
        let user = UserResponse {
            id: uuid::Uuid::new_v4(),
            username: "sari".to_string(),
            email: "sari@bps.go.id".to_string(),
            role: super::super::user::Role::User,
            created_at: chrono::Utc::now(),
        };
        let response = AuthResponse::new(user, "tok".to_string());
        assert_eq!(response.token_type, "Bearer");
    }
}
