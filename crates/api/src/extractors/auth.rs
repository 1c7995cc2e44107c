//! Bearer-token authentication extractors.
//!
//! Tokens are opaque: the extractor hashes the presented token and looks
//! the session up in the database, so revocation is immediate.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated account resolved from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    /// Hash of the presented token; logout revokes exactly this session.
    pub token_hash: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Header Authorization tidak ada".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Format header Authorization tidak valid".to_string())
        })?;

        let token_hash = shared::crypto::sha256_hex(token);

        let repo = UserRepository::new(state.pool.clone());
        let session = repo
            .find_session_by_token(&token_hash)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Token tidak valid".to_string()))?;

        let user = repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Akun tidak ditemukan".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            role: Role::from_str(&user.role).unwrap_or(Role::User),
            token_hash,
        })
    }
}

/// Authenticated account that must hold the admin or superadmin role.
///
/// Used by account-management endpoints; ordinary business endpoints only
/// require [`AuthUser`].
#[derive(Debug, Clone)]
pub struct AdminAuth(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.role.can_manage_users() {
            return Err(ApiError::Forbidden(
                "Hanya admin yang dapat mengakses endpoint ini".to_string(),
            ));
        }
        Ok(AdminAuth(auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_clone() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            username: "sari".to_string(),
            role: Role::Admin,
            token_hash: "abc".to_string(),
        };
        let cloned = auth.clone();
        assert_eq!(cloned.user_id, auth.user_id);
        assert_eq!(cloned.role, Role::Admin);
    }
}
