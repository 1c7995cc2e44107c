//! Execution-roster (penugasan) routes: header CRUD, line items, the
//! approval transition, promotion from planning rosters, and the dry-run
//! candidate import.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use domain::models::{
    AnggotaDetail, AnggotaPenugasanInput, CreatePenugasanRequest, ImportPerencanaanRequest,
    KandidatImportRow, PenugasanDetail, PreviewImportResponse, PreviewRow, StatusPenugasan,
    UpdateAnggotaRequest, UpdatePenugasanRequest,
};
use domain::services::import::{cell, jabatan_cocok, KandidatColumns};
use persistence::repositories::{
    HonorariumRepository, JabatanRepository, KegiatanRepository, MitraRepository,
    PenugasanRepository, PerencanaanRepository, UserRepository,
};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;
use crate::services::spreadsheet;

#[derive(Debug, Deserialize)]
pub struct PenugasanListQuery {
    pub tahun: Option<String>,
    pub status: Option<String>,
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

async fn check_anggota(
    state: &AppState,
    anggota: &[AnggotaPenugasanInput],
) -> Result<(), ApiError> {
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

/// List execution rosters, optionally filtered by year and/or status.
///
/// GET /api/penugasan?tahun=&status=
pub async fn list_penugasan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<PenugasanListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(query.tahun.as_deref())?;

    if let Some(ref status) = query.status {
        status
            .parse::<StatusPenugasan>()
            .map_err(ApiError::BadRequest)?;
    }

    let repo = PenugasanRepository::new(state.pool.clone());
    let data: Vec<PenugasanDetail> = repo
        .list_detail(tahun, query.status.as_deref())
        .await?
        .into_iter()
        .map(PenugasanDetail::from)
        .collect();

    Ok(error::success(data))
}

/// Create an execution roster for a sub-activity, optionally with initial
/// members. At most one roster per sub-activity.
///
/// POST /api/penugasan
pub async fn create_penugasan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreatePenugasanRequest>,
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

    let repo = PenugasanRepository::new(state.pool.clone());
    if repo.exists_for_subkegiatan(&request.id_subkegiatan).await? {
        return Err(ApiError::Conflict(format!(
            "Penugasan untuk subkegiatan {} sudah ada",
            request.id_subkegiatan
        )));
    }

    let anggota = request.anggota.unwrap_or_default();
    check_anggota(&state, &anggota).await?;

    let entity = repo
        .create_with_anggota(&request.id_subkegiatan, request.id_pengawas, &anggota)
        .await?;

    info!(
        penugasan_id = entity.id,
        id_subkegiatan = %entity.id_subkegiatan,
        jumlah_anggota = anggota.len(),
        "Penugasan dibuat"
    );

    let detail = repo
        .find_detail(entity.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Penugasan hilang setelah dibuat".to_string()))?;

    Ok((
        StatusCode::CREATED,
        error::success(PenugasanDetail::from(detail)),
    ))
}

/// Get one execution roster.
///
/// GET /api/penugasan/:id
pub async fn get_penugasan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    let detail = repo
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    Ok(error::success(PenugasanDetail::from(detail)))
}

/// Change the supervising user.
///
/// PUT /api/penugasan/:id
pub async fn update_penugasan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePenugasanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(id_pengawas) = request.id_pengawas {
        let user_repo = UserRepository::new(state.pool.clone());
        user_repo
            .find_by_id(id_pengawas)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pengawas tidak ditemukan".to_string()))?;
    }

    let repo = PenugasanRepository::new(state.pool.clone());
    repo.update_pengawas(id, request.id_pengawas)
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    info!(penugasan_id = id, "Penugasan diperbarui");

    let detail = repo
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::Internal("Penugasan hilang setelah diperbarui".to_string()))?;

    Ok(error::success(PenugasanDetail::from(detail)))
}

/// Approve a roster: `menunggu → disetujui`. Only approved rosters count
/// toward honor reporting and letter generation.
///
/// POST /api/penugasan/:id/setujui
pub async fn setujui_penugasan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    let entity = repo
        .set_status(id, StatusPenugasan::Disetujui.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    info!(penugasan_id = id, approved_by = %auth.username, "Penugasan disetujui");

    Ok(error::success(domain::models::Penugasan::from(entity)))
}

/// Delete an execution roster. Line items cascade.
///
/// DELETE /api/penugasan/:id
pub async fn delete_penugasan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Penugasan tidak ditemukan".to_string()));
    }

    info!(penugasan_id = id, "Penugasan dihapus");

    Ok(error::message_only("Penugasan berhasil dihapus"))
}

/// List members with per-member totals recomputed from current rates.
///
/// GET /api/penugasan/:id/anggota
pub async fn list_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    let data: Vec<AnggotaDetail> = repo
        .list_anggota(id)
        .await?
        .into_iter()
        .map(AnggotaDetail::from)
        .collect();

    Ok(error::success(data))
}

/// Add one member.
///
/// POST /api/penugasan/:id/anggota
pub async fn add_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AnggotaPenugasanInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = PenugasanRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    check_anggota(&state, std::slice::from_ref(&request)).await?;

    if repo.anggota_exists(id, request.id_mitra).await? {
        return Err(ApiError::BadRequest(format!(
            "Mitra {} sudah terdaftar pada penugasan ini",
            request.id_mitra
        )));
    }

    let entity = repo
        .add_anggota(id, request.id_mitra, &request.kode_jabatan, request.volume_tugas)
        .await?;

    info!(penugasan_id = id, id_mitra = request.id_mitra, "Anggota penugasan ditambahkan");

    Ok((
        StatusCode::CREATED,
        error::success(serde_json::json!({
            "id": entity.id,
            "id_penugasan": entity.id_penugasan,
            "id_mitra": entity.id_mitra,
            "kode_jabatan": entity.kode_jabatan,
            "volume_tugas": entity.volume_tugas,
        })),
    ))
}

/// Update one member's position/volume.
///
/// PUT /api/penugasan/:id/anggota/:anggota_id
pub async fn update_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, anggota_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateAnggotaRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    if let Some(volume) = request.volume_tugas {
        if volume < 1 {
            return Err(ApiError::BadRequest("Volume tugas minimal 1".to_string()));
        }
    }

    if let Some(ref kode) = request.kode_jabatan {
        let jabatan_repo = JabatanRepository::new(state.pool.clone());
        jabatan_repo
            .find_by_kode(kode)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Jabatan {} tidak ditemukan", kode)))?;
    }

    let repo = PenugasanRepository::new(state.pool.clone());
    let entity = repo
        .update_anggota(
            id,
            anggota_id,
            request.kode_jabatan.as_deref(),
            request.volume_tugas,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Anggota tidak ditemukan".to_string()))?;

    info!(penugasan_id = id, anggota_id, "Anggota penugasan diperbarui");

    Ok(error::success(serde_json::json!({
        "id": entity.id,
        "id_penugasan": entity.id_penugasan,
        "id_mitra": entity.id_mitra,
        "kode_jabatan": entity.kode_jabatan,
        "volume_tugas": entity.volume_tugas,
    })))
}

/// Remove one member.
///
/// DELETE /api/penugasan/:id/anggota/:anggota_id
pub async fn remove_anggota(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, anggota_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    let removed = repo.remove_anggota(id, anggota_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Anggota tidak ditemukan".to_string()));
    }

    info!(penugasan_id = id, anggota_id, "Anggota penugasan dihapus");

    Ok(error::message_only("Anggota berhasil dihapus"))
}

/// Promote planning rosters into execution rosters.
///
/// POST /api/penugasan/import-perencanaan
///
/// Idempotent: re-running updates existing members instead of duplicating
/// them. Members dropped from the planning roster since the last run are
/// left on the execution roster.
pub async fn import_perencanaan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ImportPerencanaanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let perencanaan_repo = PerencanaanRepository::new(state.pool.clone());
    for &id in &request.perencanaan_ids {
        perencanaan_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Perencanaan {} tidak ditemukan", id)))?;
    }

    let repo = PenugasanRepository::new(state.pool.clone());
    let result = repo
        .import_from_perencanaan(&request.perencanaan_ids)
        .await?;

    info!(
        penugasan_dibuat = result.penugasan_dibuat,
        penugasan_diperbarui = result.penugasan_diperbarui,
        anggota_ditambahkan = result.anggota_ditambahkan,
        anggota_diperbarui = result.anggota_diperbarui,
        imported_by = %auth.username,
        "Import perencanaan ke penugasan selesai"
    );

    Ok(error::success(result))
}

/// Dry-run validation of roster candidates from a spreadsheet. Nothing is
/// persisted; confirmed rows go through the ordinary add-member endpoint.
///
/// POST /api/penugasan/:id/preview-import (multipart: file)
///
/// Each row is cross-checked against (a) partner existence by sobat id,
/// (b) the partner's activation for the roster's year, (c) a fuzzy match
/// of the free-text position against the sub-activity's configured honor
/// positions, and (d) non-duplication against the existing roster.
pub async fn preview_import(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PenugasanRepository::new(state.pool.clone());
    let penugasan = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Penugasan tidak ditemukan".to_string()))?;

    let kegiatan_repo = KegiatanRepository::new(state.pool.clone());
    let subkegiatan = kegiatan_repo
        .find_subkegiatan(&penugasan.id_subkegiatan)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subkegiatan tidak ditemukan".to_string()))?;
    let tahun = subkegiatan.tanggal_mulai.year().to_string();

    let honor_repo = HonorariumRepository::new(state.pool.clone());
    let jabatan_tersedia = honor_repo
        .jabatan_for_subkegiatan(&penugasan.id_subkegiatan)
        .await?;

    let upload = spreadsheet::read_upload(multipart, state.config.import.max_upload_size).await?;
    let columns = KandidatColumns::resolve(&upload.headers);
    if !columns.is_usable() {
        return Err(ApiError::BadRequest(
            "Kolom sobat id dan jabatan tidak ditemukan pada baris header".to_string(),
        ));
    }

    let rows: Vec<KandidatImportRow> = upload
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| KandidatImportRow {
            baris: i + 2,
            sobat_id: cell(record, columns.sobat_id).map(str::to_string),
            nama: cell(record, columns.nama).map(str::to_string),
            jabatan: cell(record, columns.jabatan).map(str::to_string),
            volume: cell(record, columns.volume).and_then(|v| v.parse::<i32>().ok()),
        })
        .collect();

    let mitra_repo = MitraRepository::new(state.pool.clone());
    let mut hasil = PreviewImportResponse::default();

    for row in rows {
        let Some(sobat_id) = row.sobat_id else {
            hasil
                .warnings
                .push(format!("Baris {}: Sobat ID kosong", row.baris));
            continue;
        };

        let Some(mitra) = mitra_repo.find_by_sobat_id(&sobat_id).await? else {
            hasil.warnings.push(format!(
                "Baris {}: Mitra dengan sobat id {} tidak ditemukan",
                row.baris, sobat_id
            ));
            continue;
        };

        if !mitra_repo.is_aktif(mitra.id, &tahun).await? {
            hasil.warnings.push(format!(
                "Baris {}: Mitra {} tidak aktif pada tahun {}",
                row.baris, mitra.nama_lengkap, tahun
            ));
            continue;
        }

        let Some(jabatan_teks) = row.jabatan else {
            hasil
                .warnings
                .push(format!("Baris {}: Jabatan kosong", row.baris));
            continue;
        };

        let Some(jabatan) = jabatan_tersedia
            .iter()
            .find(|j| jabatan_cocok(&jabatan_teks, &j.nama_jabatan))
        else {
            hasil.warnings.push(format!(
                "Baris {}: Jabatan '{}' tidak cocok dengan honorarium subkegiatan",
                row.baris, jabatan_teks
            ));
            continue;
        };

        if repo.anggota_exists(id, mitra.id).await? {
            hasil.warnings.push(format!(
                "Baris {}: Mitra {} sudah terdaftar pada penugasan",
                row.baris, mitra.nama_lengkap
            ));
            continue;
        }

        hasil.valid.push(PreviewRow {
            baris: row.baris,
            sobat_id,
            id_mitra: mitra.id,
            nama_lengkap: mitra.nama_lengkap,
            kode_jabatan: jabatan.kode_jabatan.clone(),
            nama_jabatan: jabatan.nama_jabatan.clone(),
            volume_tugas: row.volume.unwrap_or(1).max(1),
        });
    }

    info!(
        penugasan_id = id,
        valid = hasil.valid.len(),
        warnings = hasil.warnings.len(),
        "Preview import penugasan"
    );

    Ok(error::success(hasil))
}
