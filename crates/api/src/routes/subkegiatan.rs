//! Sub-activity (subkegiatan) CRUD routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    CreateSubkegiatanRequest, Subkegiatan, SubkegiatanDenganKegiatan, SubkegiatanQuery,
    UpdateSubkegiatanRequest,
};
use persistence::repositories::KegiatanRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List sub-activities, optionally filtered by activity and/or year.
///
/// GET /api/subkegiatan?id_kegiatan=&tahun=
pub async fn list_subkegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SubkegiatanQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = match query.tahun.as_deref() {
        Some(t) => Some(t.parse::<i32>().map_err(|_| {
            ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string())
        })?),
        None => None,
    };

    let repo = KegiatanRepository::new(state.pool.clone());
    let data: Vec<SubkegiatanDenganKegiatan> = repo
        .list_subkegiatan(query.id_kegiatan, tahun)
        .await?
        .into_iter()
        .map(SubkegiatanDenganKegiatan::from)
        .collect();

    Ok(error::success(data))
}

/// Create a sub-activity. The system assigns the next `sub<N>` id.
///
/// POST /api/subkegiatan
pub async fn create_subkegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateSubkegiatanRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;
    request.check_dates().map_err(ApiError::BadRequest)?;

    let repo = KegiatanRepository::new(state.pool.clone());
    repo.find_by_id(request.id_kegiatan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Kegiatan tidak ditemukan".to_string()))?;

    let status = request.status.as_deref().unwrap_or("berjalan");
    let entity = repo
        .create_subkegiatan(
            request.id_kegiatan,
            &request.nama_subkegiatan,
            request.tanggal_mulai,
            request.tanggal_berakhir,
            status,
        )
        .await?;

    info!(subkegiatan_id = %entity.id, "Subkegiatan dibuat");

    Ok((StatusCode::CREATED, error::success(Subkegiatan::from(entity))))
}

/// Get one sub-activity.
///
/// GET /api/subkegiatan/:id
pub async fn get_subkegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = KegiatanRepository::new(state.pool.clone());
    let entity = repo
        .find_subkegiatan(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;

    Ok(error::success(Subkegiatan::from(entity)))
}

/// Update a sub-activity. Absent fields are left untouched; the date
/// window is revalidated against the merged values.
///
/// PUT /api/subkegiatan/:id
pub async fn update_subkegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateSubkegiatanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = KegiatanRepository::new(state.pool.clone());
    let existing = repo
        .find_subkegiatan(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;

    let mulai = request.tanggal_mulai.unwrap_or(existing.tanggal_mulai);
    let berakhir = request.tanggal_berakhir.unwrap_or(existing.tanggal_berakhir);
    if berakhir < mulai {
        return Err(ApiError::BadRequest(
            "Tanggal berakhir tidak boleh sebelum tanggal mulai".to_string(),
        ));
    }

    if let Some(id_kegiatan) = request.id_kegiatan {
        repo.find_by_id(id_kegiatan)
            .await?
            .ok_or_else(|| ApiError::NotFound("Kegiatan tidak ditemukan".to_string()))?;
    }

    let entity = repo
        .update_subkegiatan(
            &id,
            request.id_kegiatan,
            request.nama_subkegiatan.as_deref(),
            request.tanggal_mulai,
            request.tanggal_berakhir,
            request.status.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;

    info!(subkegiatan_id = %id, "Subkegiatan diperbarui");

    Ok(error::success(Subkegiatan::from(entity)))
}

/// Delete a sub-activity. Rosters and rates cascade.
///
/// DELETE /api/subkegiatan/:id
pub async fn delete_subkegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = KegiatanRepository::new(state.pool.clone());
    let removed = repo.delete_subkegiatan(&id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()));
    }

    info!(subkegiatan_id = %id, "Subkegiatan dihapus");

    Ok(error::message_only("Subkegiatan berhasil dihapus"))
}
