//! Account-management routes. All of these require the admin or
//! superadmin role.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateUserRequest, Role, UpdateUserRequest, User, UserImportRow, UserResponse};
use domain::services::import::{cell, UserColumns};
use persistence::repositories::UserRepository;
use shared::password;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AdminAuth;
use crate::services::spreadsheet;

/// List all accounts.
///
/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let users: Vec<UserResponse> = repo
        .list()
        .await?
        .into_iter()
        .map(|entity| UserResponse::from(User::from(entity)))
        .collect();

    Ok(error::success(users))
}

/// Create an account with an explicit role.
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    AdminAuth(auth): AdminAuth,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    if repo.username_taken(&request.username, None).await? {
        return Err(ApiError::Conflict("Username sudah terdaftar".to_string()));
    }
    if repo.email_taken(&request.email, None).await? {
        return Err(ApiError::Conflict("Email sudah terdaftar".to_string()));
    }

    let password_hash = password::hash_password(&request.password)?;
    let role = request.role.unwrap_or(Role::User);
    let user = repo
        .create_user(&request.username, &request.email, &password_hash, role.as_str())
        .await?;

    info!(
        username = %user.username,
        role = %role,
        created_by = %auth.username,
        "Akun dibuat"
    );

    Ok((
        StatusCode::CREATED,
        error::success(UserResponse::from(User::from(user))),
    ))
}

/// Get one account.
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Akun tidak ditemukan".to_string()))?;

    Ok(error::success(UserResponse::from(User::from(user))))
}

/// Update an account. Absent fields are left untouched; uniqueness checks
/// ignore the account itself.
///
/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    if let Some(ref username) = request.username {
        if repo.username_taken(username, Some(id)).await? {
            return Err(ApiError::Conflict("Username sudah terdaftar".to_string()));
        }
    }
    if let Some(ref email) = request.email {
        if repo.email_taken(email, Some(id)).await? {
            return Err(ApiError::Conflict("Email sudah terdaftar".to_string()));
        }
    }

    let password_hash = match &request.password {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };

    let user = repo
        .update_user(
            id,
            request.username.as_deref(),
            request.email.as_deref(),
            password_hash.as_deref(),
            request.role.map(|r| r.as_str()),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Akun tidak ditemukan".to_string()))?;

    info!(user_id = %id, "Akun diperbarui");

    Ok(error::success(UserResponse::from(User::from(user))))
}

/// Delete an account.
///
/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AdminAuth(auth): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if auth.user_id == id {
        return Err(ApiError::BadRequest(
            "Tidak dapat menghapus akun sendiri".to_string(),
        ));
    }

    let repo = UserRepository::new(state.pool.clone());
    let removed = repo.delete_user(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Akun tidak ditemukan".to_string()));
    }

    info!(user_id = %id, deleted_by = %auth.username, "Akun dihapus");

    Ok(error::message_only("Akun berhasil dihapus"))
}

/// Import accounts from a spreadsheet.
///
/// POST /api/users/import (multipart: file)
///
/// Rows upsert by username. Passwords present in the sheet are hashed;
/// rows without one get the configured default. The whole sheet runs in
/// one transaction; per-row validation failures are reported without
/// aborting the batch.
pub async fn import_users(
    State(state): State<AppState>,
    AdminAuth(auth): AdminAuth,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let upload = spreadsheet::read_upload(multipart, state.config.import.max_upload_size).await?;

    let columns = UserColumns::resolve(&upload.headers);
    if !columns.is_usable() {
        return Err(ApiError::BadRequest(
            "Kolom username dan email tidak ditemukan pada baris header".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(upload.rows.len());
    for (i, record) in upload.rows.iter().enumerate() {
        // +2: 1-based numbering plus the header row
        let baris = i + 2;
        let password_hash = match cell(record, columns.password) {
            Some(plain) => Some(password::hash_password(plain)?),
            None => None,
        };
        rows.push(UserImportRow {
            baris,
            username: cell(record, columns.username).map(str::to_string),
            email: cell(record, columns.email).map(str::to_string),
            password_hash,
            // unknown role values fall back to the default rather than
            // tripping the role CHECK constraint mid-transaction
            role: cell(record, columns.role)
                .map(str::to_lowercase)
                .filter(|r| r.parse::<Role>().is_ok()),
        });
    }

    let default_hash = password::hash_password(&state.config.import.default_password)?;
    let repo = UserRepository::new(state.pool.clone());
    let report = repo.import_batch(&rows, &default_hash).await?;

    info!(
        berhasil = report.berhasil,
        gagal = report.gagal,
        imported_by = %auth.username,
        "Import akun selesai"
    );

    Ok(error::success_message("Import akun selesai", report))
}
