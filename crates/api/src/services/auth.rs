//! Authentication service: registration, login, and session revocation.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use domain::models::Role;
use persistence::repositories::UserRepository;
use shared::{crypto, password};

/// Error type for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username sudah terdaftar")]
    UsernameTaken,

    #[error("Email sudah terdaftar")]
    EmailTaken,

    #[error("Username/email atau password salah")]
    InvalidCredentials,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] password::PasswordError),
}

/// Outcome of a successful registration or login: the account plus a
/// freshly issued plaintext token (returned to the client exactly once).
#[derive(Debug)]
pub struct AuthOutcome {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub token: String,
}

/// Authentication service backed by the user repository.
pub struct AuthService {
    repo: UserRepository,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: UserRepository::new(pool),
        }
    }

    /// Register a new `user`-role account and issue a token immediately
    /// (registration implies login).
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plain_password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        if self.repo.username_taken(username, None).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.repo.email_taken(email, None).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password::hash_password(plain_password)?;
        let user = self
            .repo
            .create_user(username, email, &password_hash, Role::User.as_str())
            .await?;

        let token = self.issue_token(user.id).await?;

        Ok(AuthOutcome {
            user_id: user.id,
            username: user.username,
            email: user.email,
            role: Role::User,
            created_at: user.created_at,
            token,
        })
    }

    /// Log in with a username-or-email identifier. A successful login
    /// issues a new token without revoking prior sessions.
    pub async fn login(
        &self,
        identifier: &str,
        plain_password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let user = self
            .repo
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(plain_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id).await?;
        let role = user.role.parse().unwrap_or(Role::User);

        Ok(AuthOutcome {
            user_id: user.id,
            username: user.username,
            email: user.email,
            role,
            created_at: user.created_at,
            token,
        })
    }

    /// Revoke exactly the session whose token hash is presented.
    pub async fn logout(&self, token_hash: &str) -> Result<bool, AuthError> {
        let removed = self.repo.delete_session_by_token(token_hash).await?;
        Ok(removed > 0)
    }

    /// Generate an opaque token and persist only its hash.
    async fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let token = crypto::generate_token();
        let token_hash = crypto::sha256_hex(&token);
        self.repo.create_session(user_id, &token_hash).await?;
        Ok(token)
    }
}
