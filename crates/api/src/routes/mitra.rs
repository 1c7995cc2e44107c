//! Field-partner routes: search, year-scoped listing, upsert-by-NIK
//! creation, dual-semantics deletion, activation toggles, and the
//! spreadsheet import.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use tracing::info;
use validator::Validate;

use domain::models::{
    AktivasiTahunRequest, CreateMitraRequest, Mitra, MitraDeleteQuery, MitraDenganTahun,
    MitraImportRow, MitraPaginatedQuery, MitraPaginatedResponse, MitraSearchQuery, PageQuery,
    Pagination, TahunAktif, UpdateMitraRequest,
};
use domain::services::import::{cell, MitraColumns};
use persistence::repositories::{MitraDeleteOutcome, MitraRepository};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;
use crate::services::spreadsheet;

/// Current calendar year as the activation default.
fn tahun_sekarang() -> String {
    Utc::now().year().to_string()
}

async fn dengan_tahun(
    repo: &MitraRepository,
    entity: persistence::entities::MitraEntity,
) -> Result<MitraDenganTahun, ApiError> {
    let tahun = repo.tahun_aktif_for(entity.id).await?;
    Ok(MitraDenganTahun {
        mitra: Mitra::from(entity),
        tahun_aktif: tahun.into_iter().map(TahunAktif::from).collect(),
    })
}

/// Free-text partner search.
///
/// GET /api/mitra?search=
pub async fn list_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<MitraSearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = MitraRepository::new(state.pool.clone());
    let hasil = repo.search(query.search.as_deref()).await?;

    let mut data = Vec::with_capacity(hasil.len());
    for entity in hasil {
        data.push(dengan_tahun(&repo, entity).await?);
    }

    Ok(error::success(data))
}

/// Page of partners active in a year, with the year-wide active headcount.
///
/// GET /api/mitra/paginated?tahun=YYYY&search=&page=&per_page=
pub async fn list_mitra_paginated(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<MitraPaginatedQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    shared::validation::validate_tahun(&query.tahun)
        .map_err(|_| ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string()))?;

    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve();

    let repo = MitraRepository::new(state.pool.clone());
    let total = repo.count_aktif(&query.tahun, query.search.as_deref()).await?;
    let total_aktif = repo.total_aktif(&query.tahun).await?;
    let entities = repo
        .list_aktif_paginated(&query.tahun, query.search.as_deref(), per_page, offset)
        .await?;

    let mut data = Vec::with_capacity(entities.len());
    for entity in entities {
        data.push(dengan_tahun(&repo, entity).await?);
    }

    Ok(error::success(MitraPaginatedResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
        total_aktif,
    }))
}

/// Create a partner, upserting by NIK. Posting an existing NIK overwrites
/// the row with the latest payload; the response is 201 either way. The
/// partner is activated for the requested (default: current) year.
///
/// POST /api/mitra
pub async fn create_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateMitraRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let tahun = request.tahun.clone().unwrap_or_else(tahun_sekarang);
    let repo = MitraRepository::new(state.pool.clone());

    let entity = repo
        .upsert_by_nik(
            &request.nama_lengkap,
            &request.nik,
            request.sobat_id.as_deref(),
            request.alamat.as_deref(),
            request.nomor_hp.as_deref(),
            request.email.as_deref(),
            request.jenis_kelamin.as_deref(),
            request.pendidikan.as_deref(),
            request.pekerjaan.as_deref(),
            &tahun,
        )
        .await?;

    info!(mitra_id = entity.id, nik = %entity.nik, tahun = %tahun, "Mitra disimpan");

    let data = dengan_tahun(&repo, entity).await?;
    Ok((StatusCode::CREATED, error::success(data)))
}

/// Get one partner with its activation years.
///
/// GET /api/mitra/:id
pub async fn get_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = MitraRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mitra tidak ditemukan".to_string()))?;

    let data = dengan_tahun(&repo, entity).await?;
    Ok(error::success(data))
}

/// Update a partner. Absent fields are left untouched; a NIK change is
/// checked against other rows first.
///
/// PUT /api/mitra/:id
pub async fn update_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMitraRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = MitraRepository::new(state.pool.clone());

    if let Some(ref nik) = request.nik {
        if let Some(existing) = repo.find_by_nik(nik).await? {
            if existing.id != id {
                return Err(ApiError::Conflict(format!(
                    "NIK {} sudah dipakai mitra lain",
                    nik
                )));
            }
        }
    }

    let entity = repo
        .update_mitra(
            id,
            request.nama_lengkap.as_deref(),
            request.nik.as_deref(),
            request.sobat_id.as_deref(),
            request.alamat.as_deref(),
            request.nomor_hp.as_deref(),
            request.email.as_deref(),
            request.jenis_kelamin.as_deref(),
            request.pendidikan.as_deref(),
            request.pekerjaan.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Mitra tidak ditemukan".to_string()))?;

    info!(mitra_id = id, "Mitra diperbarui");

    let data = dengan_tahun(&repo, entity).await?;
    Ok(error::success(data))
}

/// Delete a partner, or only one year's activation.
///
/// DELETE /api/mitra/:id?tahun=YYYY
///
/// With a year targeted and activations in more than one year, only that
/// year's activation goes; otherwise the partner row itself is removed.
pub async fn delete_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<MitraDeleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(ref tahun) = query.tahun {
        shared::validation::validate_tahun(tahun)
            .map_err(|_| ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string()))?;
    }

    let repo = MitraRepository::new(state.pool.clone());
    let outcome = repo.delete_mitra(id, query.tahun.as_deref()).await?;

    match outcome {
        MitraDeleteOutcome::TahunDihapus(tahun) => {
            info!(mitra_id = id, tahun = %tahun, "Keaktifan tahun mitra dihapus");
            Ok(error::message_only(&format!(
                "Keaktifan mitra untuk tahun {} berhasil dihapus",
                tahun
            )))
        }
        MitraDeleteOutcome::MitraDihapus => {
            info!(mitra_id = id, "Mitra dihapus");
            Ok(error::message_only("Mitra berhasil dihapus"))
        }
        MitraDeleteOutcome::TidakDitemukan => {
            Err(ApiError::NotFound("Mitra tidak ditemukan".to_string()))
        }
    }
}

/// Activate a partner for a year.
///
/// POST /api/mitra/:id/aktifkan
pub async fn aktifkan_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AktivasiTahunRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;
    set_status_tahun(state, id, &request.tahun, "aktif").await
}

/// Deactivate a partner for a year.
///
/// POST /api/mitra/:id/nonaktifkan
pub async fn nonaktifkan_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AktivasiTahunRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;
    set_status_tahun(state, id, &request.tahun, "non-aktif").await
}

async fn set_status_tahun(
    state: AppState,
    id: i64,
    tahun: &str,
    status: &str,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = MitraRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mitra tidak ditemukan".to_string()))?;

    let entity = repo.set_status_tahun(id, tahun, status).await?;

    info!(mitra_id = id, tahun = %tahun, status = %status, "Status tahun mitra diubah");

    Ok(error::success(TahunAktif::from(entity)))
}

/// Import partners from a spreadsheet.
///
/// POST /api/mitra/import (multipart: file, tahun?)
///
/// Header names are matched against synonym lists after normalization.
/// Rows upsert by NIK and activate the partner for the form's year
/// (default: current). The whole sheet runs in one transaction; blank
/// NIKs and in-sheet duplicates are reported per row without aborting
/// the batch.
pub async fn import_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let upload = spreadsheet::read_upload(multipart, state.config.import.max_upload_size).await?;

    let tahun = match upload.fields.get("tahun") {
        Some(t) => {
            shared::validation::validate_tahun(t).map_err(|_| {
                ApiError::BadRequest("Field tahun harus berformat YYYY".to_string())
            })?;
            t.clone()
        }
        None => tahun_sekarang(),
    };

    let columns = MitraColumns::resolve(&upload.headers);
    if !columns.is_usable() {
        return Err(ApiError::BadRequest(
            "Kolom nama dan NIK tidak ditemukan pada baris header".to_string(),
        ));
    }

    let rows: Vec<MitraImportRow> = upload
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| MitraImportRow {
            // +2: 1-based numbering plus the header row
            baris: i + 2,
            nama_lengkap: cell(record, columns.nama).map(str::to_string),
            nik: cell(record, columns.nik).map(str::to_string),
            sobat_id: cell(record, columns.sobat_id).map(str::to_string),
            alamat: cell(record, columns.alamat).map(str::to_string),
            nomor_hp: cell(record, columns.nomor_hp).map(str::to_string),
            email: cell(record, columns.email).map(str::to_string),
            jenis_kelamin: cell(record, columns.jenis_kelamin).map(str::to_string),
            pendidikan: cell(record, columns.pendidikan).map(str::to_string),
            pekerjaan: cell(record, columns.pekerjaan).map(str::to_string),
        })
        .collect();

    let repo = MitraRepository::new(state.pool.clone());
    let report = repo.import_batch(&rows, &tahun).await?;

    info!(
        berhasil = report.berhasil,
        dilewati = report.dilewati,
        gagal = report.gagal,
        tahun = %tahun,
        "Import mitra selesai"
    );

    Ok(error::success_message("Import mitra selesai", report))
}
