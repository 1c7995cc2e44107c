//! Authentication routes: registration, login, logout, current account.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use domain::models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;
use crate::services::auth::{AuthError, AuthService};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UsernameTaken | AuthError::EmailTaken => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Database(e) => e.into(),
            AuthError::Password(e) => e.into(),
        }
    }
}

fn outcome_to_response(outcome: crate::services::auth::AuthOutcome) -> AuthResponse {
    AuthResponse::new(
        UserResponse {
            id: outcome.user_id,
            username: outcome.username,
            email: outcome.email,
            role: outcome.role,
            created_at: outcome.created_at,
        },
        outcome.token,
    )
}

/// Register a new account. Registration implies login: the response
/// carries a fresh bearer token.
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let service = AuthService::new(state.pool.clone());
    let outcome = service
        .register(&request.username, &request.email, &request.password)
        .await?;

    info!(username = %request.username, "Akun terdaftar");

    Ok((
        StatusCode::CREATED,
        error::success(outcome_to_response(outcome)),
    ))
}

/// Log in with a username-or-email identifier. Prior sessions stay valid.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let service = AuthService::new(state.pool.clone());
    let outcome = service.login(&request.identifier, &request.password).await?;

    info!(identifier = %request.identifier, "Login berhasil");

    Ok(error::success(outcome_to_response(outcome)))
}

/// Revoke the session used by this request; other sessions are untouched.
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = AuthService::new(state.pool.clone());
    service.logout(&auth.token_hash).await?;

    info!(user_id = %auth.user_id, "Logout");

    Ok(error::message_only("Logout berhasil"))
}

/// The account behind the presented token.
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Akun tidak ditemukan".to_string()))?;

    let user: domain::models::User = user.into();
    Ok(error::success(UserResponse::from(user)))
}
