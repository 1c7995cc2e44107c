//! Planning-roster (perencanaan) routes: header CRUD plus line-item
//! management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use domain::models::{
    AnggotaDetail, AnggotaInput, CreatePerencanaanRequest, PerencanaanDetail,
    UpdateAnggotaRequest, UpdatePerencanaanRequest,
};
use persistence::repositories::{
    JabatanRepository, KegiatanRepository, MitraRepository, PerencanaanRepository, UserRepository,
};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

#[derive(Debug, Deserialize)]
pub struct PerencanaanListQuery {
    pub tahun: Option<String>,
}

fn parse_tahun(tahun: Option<&str>) -> Result<Option<i32>, ApiError> {
    match tahun {
        Some(t) => t
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string())),
        None => Ok(None),
    }
}

/// Validates member rows against the partner registry and position
/// catalog before any insert happens.
async fn check_anggota(state: &AppState, anggota: &[AnggotaInput]) -> Result<(), ApiError> {
    let mitra_repo = MitraRepository::new(state.pool.clone());
    let jabatan_repo = JabatanRepository::new(state.pool.clone());

    for a in anggota {
        if mitra_repo.find_by_id(a.id_mitra).await?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Mitra dengan id {} tidak ditemukan",
                a.id_mitra
            )));
        }
        if jabatan_repo.find_by_kode(&a.kode_jabatan).await?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Jabatan {} tidak ditemukan",
                a.kode_jabatan
            )));
        }
    }
    Ok(())
}

/// List planning rosters with display fields and member counts.
///
/// GET /api/perencanaan?tahun=
pub async fn list_perencanaan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<PerencanaanListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(query.tahun.as_deref())?;
    let repo = PerencanaanRepository::new(state.pool.clone());
    let data: Vec<PerencanaanDetail> = repo
        .list_detail(tahun)
        .await?
        .into_iter()
        .map(PerencanaanDetail::from)
        .collect();

    Ok(error::success(data))
}

/// Create a planning roster for a sub-activity, optionally with initial
/// members. At most one roster per sub-activity; the duplicate check runs
/// before any write and the header plus members land in one transaction.
///
/// POST /api/perencanaan
pub async fn create_perencanaan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreatePerencanaanRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let kegiatan_repo = KegiatanRepository::new(state.pool.clone());
    kegiatan_repo
        .find_subkegiatan(&request.id_subkegiatan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;

    let user_repo = UserRepository::new(state.pool.clone());
    user_repo
        .find_by_id(request.id_pengawas)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pengawas tidak ditemukan".to_string()))?;

    let repo = PerencanaanRepository::new(state.pool.clone());
    if repo.exists_for_subkegiatan(&request.id_subkegiatan).await? {
        return Err(ApiError::Conflict(format!(
            "Perencanaan untuk subkegiatan {} sudah ada",
            request.id_subkegiatan
        )));
    }

    let anggota = request.anggota.unwrap_or_default();
    check_anggota(&state, &anggota).await?;

    let entity = repo
        .create_with_anggota(&request.id_subkegiatan, request.id_pengawas, &anggota)
        .await?;

    info!(
        perencanaan_id = entity.id,
        id_subkegiatan = %entity.id_subkegiatan,
        jumlah_anggota = anggota.len(),
        "Perencanaan dibuat"
    );

    let detail = repo
        .find_detail(entity.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Perencanaan hilang setelah dibuat".to_string()))?;

    Ok((
        StatusCode::CREATED,
        error::success(PerencanaanDetail::from(detail)),
    ))
}

/// Get one planning roster.
///
/// GET /api/perencanaan/:id
pub async fn get_perencanaan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PerencanaanRepository::new(state.pool.clone());
    let detail = repo
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Perencanaan tidak ditemukan".to_string()))?;

    Ok(error::success(PerencanaanDetail::from(detail)))
}

/// Change the supervising user.
///
/// PUT /api/perencanaan/:id
pub async fn update_perencanaan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePerencanaanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(id_pengawas) = request.id_pengawas {
        let user_repo = UserRepository::new(state.pool.clone());
        user_repo
            .find_by_id(id_pengawas)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pengawas tidak ditemukan".to_string()))?;
    }

    let repo = PerencanaanRepository::new(state.pool.clone());
    repo.update_pengawas(id, request.id_pengawas)
        .await?
        .ok_or_else(|| ApiError::NotFound("Perencanaan tidak ditemukan".to_string()))?;

    info!(perencanaan_id = id, "Perencanaan diperbarui");

    let detail = repo
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::Internal("Perencanaan hilang setelah diperbarui".to_string()))?;

    Ok(error::success(PerencanaanDetail::from(detail)))
}

/// Delete a planning roster. Line items cascade.
///
/// DELETE /api/perencanaan/:id
pub async fn delete_perencanaan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PerencanaanRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Perencanaan tidak ditemukan".to_string()));
    }

    info!(perencanaan_id = id, "Perencanaan dihapus");

    Ok(error::message_only("Perencanaan berhasil dihapus"))
}

/// List members with per-member totals recomputed from current rates.
///
/// GET /api/perencanaan/:id/anggota
pub async fn list_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PerencanaanRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Perencanaan tidak ditemukan".to_string()))?;

    let data: Vec<AnggotaDetail> = repo
        .list_anggota(id)
        .await?
        .into_iter()
        .map(AnggotaDetail::from)
        .collect();

    Ok(error::success(data))
}

/// Add one member. The duplicate (roster, partner) check is advisory; a
/// raced insert still trips the unique index and surfaces as 409.
///
/// POST /api/perencanaan/:id/anggota
pub async fn add_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AnggotaInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = PerencanaanRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Perencanaan tidak ditemukan".to_string()))?;

    check_anggota(&state, std::slice::from_ref(&request)).await?;

    if repo.anggota_exists(id, request.id_mitra).await? {
        return Err(ApiError::BadRequest(format!(
            "Mitra {} sudah terdaftar pada perencanaan ini",
            request.id_mitra
        )));
    }

    let entity = repo
        .add_anggota(id, request.id_mitra, &request.kode_jabatan, request.volume_tugas)
        .await?;

    info!(
        perencanaan_id = id,
        id_mitra = request.id_mitra,
        "Anggota perencanaan ditambahkan"
    );

    Ok((
        StatusCode::CREATED,
        error::success(serde_json::json!({
            "id": entity.id,
            "id_perencanaan": entity.id_perencanaan,
            "id_mitra": entity.id_mitra,
            "kode_jabatan": entity.kode_jabatan,
            "volume_tugas": entity.volume_tugas,
        })),
    ))
}

/// Update one member's position/volume.
///
/// PUT /api/perencanaan/:id/anggota/:anggota_id
pub async fn update_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, anggota_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateAnggotaRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    if let Some(ref kode) = request.kode_jabatan {
        let jabatan_repo = JabatanRepository::new(state.pool.clone());
        jabatan_repo
            .find_by_kode(kode)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Jabatan {} tidak ditemukan", kode)))?;
    }

    let repo = PerencanaanRepository::new(state.pool.clone());
    let entity = repo
        .update_anggota(
            id,
            anggota_id,
            request.kode_jabatan.as_deref(),
            request.volume_tugas,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Anggota tidak ditemukan".to_string()))?;

    info!(perencanaan_id = id, anggota_id, "Anggota perencanaan diperbarui");

    Ok(error::success(serde_json::json!({
        "id": entity.id,
        "id_perencanaan": entity.id_perencanaan,
        "id_mitra": entity.id_mitra,
        "kode_jabatan": entity.kode_jabatan,
        "volume_tugas": entity.volume_tugas,
    })))
}

/// Remove one member.
///
/// DELETE /api/perencanaan/:id/anggota/:anggota_id
pub async fn remove_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, anggota_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PerencanaanRepository::new(state.pool.clone());
    let removed = repo.remove_anggota(id, anggota_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Anggota tidak ditemukan".to_string()));
    }

    info!(perencanaan_id = id, anggota_id, "Anggota perencanaan dihapus");

    Ok(error::message_only("Anggota berhasil dihapus"))
}
