//! Position-catalog (jabatan mitra) CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{CreateJabatanRequest, JabatanMitra, UpdateJabatanRequest};
use persistence::repositories::JabatanRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List all positions.
///
/// GET /api/jabatan
pub async fn list_jabatan(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = JabatanRepository::new(state.pool.clone());
    let data: Vec<JabatanMitra> = repo
        .list()
        .await?
        .into_iter()
        .map(JabatanMitra::from)
        .collect();
    Ok(error::success(data))
}

/// Create a position.
///
/// POST /api/jabatan
pub async fn create_jabatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateJabatanRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = JabatanRepository::new(state.pool.clone());
    if repo.find_by_kode(&request.kode_jabatan).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Kode jabatan {} sudah terdaftar",
            request.kode_jabatan
        )));
    }

    let entity = repo
        .create(&request.kode_jabatan, &request.nama_jabatan)
        .await?;

    info!(kode_jabatan = %entity.kode_jabatan, "Jabatan dibuat");

    Ok((StatusCode::CREATED, error::success(JabatanMitra::from(entity))))
}

/// Get one position.
///
/// GET /api/jabatan/:kode
pub async fn get_jabatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kode): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = JabatanRepository::new(state.pool.clone());
    let entity = repo
        .find_by_kode(&kode)
        .await?
        .ok_or_else(|| ApiError::NotFound("Jabatan tidak ditemukan".to_string()))?;

    Ok(error::success(JabatanMitra::from(entity)))
}

/// Rename a position.
///
/// PUT /api/jabatan/:kode
pub async fn update_jabatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kode): Path<String>,
    Json(request): Json<UpdateJabatanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = JabatanRepository::new(state.pool.clone());
    let entity = repo
        .update(&kode, request.nama_jabatan.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Jabatan tidak ditemukan".to_string()))?;

    info!(kode_jabatan = %kode, "Jabatan diperbarui");

    Ok(error::success(JabatanMitra::from(entity)))
}

/// Delete a position. While honor rows or roster lines still reference
/// the code, Postgres rejects the delete and the handler reports 409 —
/// the position row stays put.
///
/// DELETE /api/jabatan/:kode
pub async fn delete_jabatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kode): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = JabatanRepository::new(state.pool.clone());
    let removed = repo.delete(&kode).await.map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::Conflict(format!(
            "Jabatan {} masih dipakai honorarium atau kelompok kerja",
            kode
        )),
        other => other,
    })?;

    if removed == 0 {
        return Err(ApiError::NotFound("Jabatan tidak ditemukan".to_string()));
    }

    info!(kode_jabatan = %kode, "Jabatan dihapus");

    Ok(error::message_only("Jabatan berhasil dihapus"))
}
