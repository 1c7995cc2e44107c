//! System account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Superadmin,
    Mitra,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
            Self::Mitra => "mitra",
        }
    }

    /// Whether this role may manage other accounts.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            "mitra" => Ok(Self::Mitra),
            other => Err(format!("Role tidak dikenal: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// System account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account as exposed over the API (no hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for creating an account (admin-side).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username harus 3-50 karakter"))]
    pub username: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: String,

    pub role: Option<Role>,
}

/// Request body for updating an account. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username harus 3-50 karakter"))]
    pub username: Option<String>,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: Option<String>,

    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Admin, Role::Superadmin, Role::Mitra] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_unknown() {
        assert!(Role::from_str("root").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_can_manage_users() {
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Superadmin.can_manage_users());
        assert!(!Role::User.can_manage_users());
        assert!(!Role::Mitra.can_manage_users());
    }

    #[test]
    fn test_create_user_request_validation() {
        let request = CreateUserRequest {
            username: "budi".to_string(),
            email: "budi@bps.go.id".to_string(),
            password: "rahasia-sekali".to_string(),
            role: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_short_username() {
        let request = CreateUserRequest {
            username: "ab".to_string(),
            email: "budi@bps.go.id".to_string(),
            password: "rahasia-sekali".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_user_request_partial() {
        let request = UpdateUserRequest {
            username: None,
            email: Some("baru@bps.go.id".to_string()),
            password: None,
            role: Some(Role::Admin),
        };
        assert!(request.validate().is_ok());
    }
}
