//! Honor-rate (honorarium) CRUD routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    CreateHonorariumRequest, Honorarium, HonorariumDetail, HonorariumQuery, UpdateHonorariumRequest,
};
use persistence::repositories::{
    HonorariumRepository, JabatanRepository, KegiatanRepository, SatuanRepository,
};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List rates with position and unit names, optionally filtered by
/// sub-activity.
///
/// GET /api/honorarium?id_subkegiatan=
pub async fn list_honorarium(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<HonorariumQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = HonorariumRepository::new(state.pool.clone());
    let data: Vec<HonorariumDetail> = repo
        .list_detail(query.id_subkegiatan.as_deref())
        .await?
        .into_iter()
        .map(HonorariumDetail::from)
        .collect();

    Ok(error::success(data))
}

/// Create a rate for a (sub-activity, position) pair. One rate per pair.
///
/// POST /api/honorarium
pub async fn create_honorarium(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateHonorariumRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;
    request.check_tarif().map_err(ApiError::BadRequest)?;

    let kegiatan_repo = KegiatanRepository::new(state.pool.clone());
    kegiatan_repo
        .find_subkegiatan(&request.id_subkegiatan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;

    let jabatan_repo = JabatanRepository::new(state.pool.clone());
    jabatan_repo
        .find_by_kode(&request.kode_jabatan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Jabatan tidak ditemukan".to_string()))?;

    let satuan_repo = SatuanRepository::new(state.pool.clone());
    satuan_repo
        .find_by_id(request.id_satuan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Satuan tidak ditemukan".to_string()))?;

    let repo = HonorariumRepository::new(state.pool.clone());
    if repo
        .exists_for_pair(&request.id_subkegiatan, &request.kode_jabatan)
        .await?
    {
        return Err(ApiError::Conflict(format!(
            "Honorarium untuk jabatan {} pada subkegiatan {} sudah ada",
            request.kode_jabatan, request.id_subkegiatan
        )));
    }

    let entity = repo
        .create(
            &request.id_subkegiatan,
            &request.kode_jabatan,
            request.tarif,
            request.id_satuan,
            request.basis_volume,
            request.beban_anggaran.as_deref(),
        )
        .await?;

    info!(
        honorarium_id = entity.id,
        id_subkegiatan = %entity.id_subkegiatan,
        kode_jabatan = %entity.kode_jabatan,
        "Honorarium dibuat"
    );

    Ok((StatusCode::CREATED, error::success(Honorarium::from(entity))))
}

/// Get one rate.
///
/// GET /api/honorarium/:id
pub async fn get_honorarium(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = HonorariumRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Honorarium tidak ditemukan".to_string()))?;

    Ok(error::success(Honorarium::from(entity)))
}

/// Update a rate. Absent fields are left untouched.
///
/// PUT /api/honorarium/:id
pub async fn update_honorarium(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateHonorariumRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    if let Some(tarif) = request.tarif {
        if tarif < rust_decimal::Decimal::ZERO {
            return Err(ApiError::BadRequest("Tarif tidak boleh negatif".to_string()));
        }
    }

    if let Some(id_satuan) = request.id_satuan {
        let satuan_repo = SatuanRepository::new(state.pool.clone());
        satuan_repo
            .find_by_id(id_satuan)
            .await?
            .ok_or_else(|| ApiError::NotFound("Satuan tidak ditemukan".to_string()))?;
    }

    let repo = HonorariumRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.tarif,
            request.id_satuan,
            request.basis_volume,
            request.beban_anggaran.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Honorarium tidak ditemukan".to_string()))?;

    info!(honorarium_id = id, "Honorarium diperbarui");

    Ok(error::success(Honorarium::from(entity)))
}

/// Delete a rate.
///
/// DELETE /api/honorarium/:id
pub async fn delete_honorarium(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = HonorariumRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Honorarium tidak ditemukan".to_string()));
    }

    info!(honorarium_id = id, "Honorarium dihapus");

    Ok(error::message_only("Honorarium berhasil dihapus"))
}
