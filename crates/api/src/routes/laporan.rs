//! Reporting routes: execution-side honor transactions with cap flags,
//! and planning-side monthly recaps.

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use tracing::info;

use domain::models::{
    RekapBulan, RekapBulananQuery, RekapDetailQuery, RekapDetailRow, RekapMitraQuery,
    RekapMitraRow, TransaksiQuery, TransaksiRow,
};
use domain::services::honor::{batas_untuk, evaluasi_batas, nama_bulan};
use persistence::repositories::{AturanPeriodeRepository, LaporanRepository};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

fn parse_tahun(tahun: &str) -> Result<i32, ApiError> {
    shared::validation::validate_tahun(tahun)
        .map_err(|_| ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string()))?;
    tahun
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest("Parameter tahun harus berformat YYYY".to_string()))
}

fn check_bulan(bulan: u32) -> Result<(), ApiError> {
    if !(1..=12).contains(&bulan) {
        return Err(ApiError::BadRequest(
            "Parameter bulan harus 1-12".to_string(),
        ));
    }
    Ok(())
}

/// Monthly cap for the year, from the year's rule. Reports over a year
/// with no configured rule run with a zero cap so every paid partner is
/// flagged.
async fn batas_bulanan(state: &AppState, tahun: &str) -> Result<Decimal, ApiError> {
    let repo = AturanPeriodeRepository::new(state.pool.clone());
    Ok(repo
        .find_by_periode(tahun)
        .await?
        .map(|aturan| aturan.batas_honor)
        .unwrap_or(Decimal::ZERO))
}

/// Transaction report: per-partner totals over approved execution rosters,
/// flagged against the year's cap. Without a month filter the cap is the
/// monthly value times twelve; with one, the raw monthly value.
///
/// GET /api/transaksi?tahun=YYYY&bulan=&id_kegiatan=&id_subkegiatan=
pub async fn transaksi(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<TransaksiQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(&query.tahun)?;
    if let Some(bulan) = query.bulan {
        check_bulan(bulan)?;
    }

    let batas = batas_untuk(batas_bulanan(&state, &query.tahun).await?, query.bulan);

    let repo = LaporanRepository::new(state.pool.clone());
    let rows = repo
        .total_honor_penugasan(
            tahun,
            query.bulan.map(|b| b as i32),
            query.id_kegiatan,
            query.id_subkegiatan.as_deref(),
        )
        .await?;

    let data: Vec<TransaksiRow> = rows
        .into_iter()
        .map(|r| TransaksiRow {
            id_mitra: r.id_mitra,
            nama_lengkap: r.nama_lengkap,
            nik: r.nik,
            status_batas: evaluasi_batas(r.total_honor, batas),
            total_honor: r.total_honor,
            batas_honor: batas,
        })
        .collect();

    info!(tahun, bulan = ?query.bulan, jumlah_mitra = data.len(), "Laporan transaksi");

    Ok(error::success(data))
}

/// Planning recap bucketed by month, with localized month names.
///
/// GET /api/perencanaan/rekap-bulanan?tahun=YYYY
pub async fn rekap_bulanan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RekapBulananQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(&query.tahun)?;

    let repo = LaporanRepository::new(state.pool.clone());
    let data: Vec<RekapBulan> = repo
        .rekap_bulanan(tahun)
        .await?
        .into_iter()
        .map(|r| {
            let bulan = r.bulan.max(0) as u32;
            RekapBulan {
                bulan,
                nama_bulan: nama_bulan(bulan).to_string(),
                jumlah_mitra: r.jumlah_mitra,
                total_honor: r.total_honor,
            }
        })
        .collect();

    Ok(error::success(data))
}

/// Per-partner planning totals within one month, flagged against the raw
/// monthly cap.
///
/// GET /api/perencanaan/rekap-mitra?tahun=YYYY&bulan=M
pub async fn rekap_mitra(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RekapMitraQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(&query.tahun)?;
    check_bulan(query.bulan)?;

    let batas = batas_bulanan(&state, &query.tahun).await?;

    let repo = LaporanRepository::new(state.pool.clone());
    let data: Vec<RekapMitraRow> = repo
        .rekap_mitra(tahun, query.bulan as i32)
        .await?
        .into_iter()
        .map(|r| RekapMitraRow {
            id_mitra: r.id_mitra,
            nama_lengkap: r.nama_lengkap,
            nik: r.nik,
            status_batas: evaluasi_batas(r.total_honor, batas),
            total_honor: r.total_honor,
            batas_honor: batas,
        })
        .collect();

    Ok(error::success(data))
}

/// Drill-down: every planning line contributing to one partner's monthly
/// total.
///
/// GET /api/perencanaan/rekap-detail?tahun=YYYY&bulan=M&id_mitra=
pub async fn rekap_detail(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RekapDetailQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tahun = parse_tahun(&query.tahun)?;
    check_bulan(query.bulan)?;

    let repo = LaporanRepository::new(state.pool.clone());
    let data: Vec<RekapDetailRow> = repo
        .rekap_detail(tahun, query.bulan as i32, query.id_mitra)
        .await?
        .into_iter()
        .map(|r| RekapDetailRow {
            id_subkegiatan: r.id_subkegiatan,
            nama_subkegiatan: r.nama_subkegiatan,
            nama_kegiatan: r.nama_kegiatan,
            kode_jabatan: r.kode_jabatan,
            nama_jabatan: r.nama_jabatan,
            volume_tugas: r.volume_tugas,
            tarif: r.tarif,
            total_honor: r.total_honor,
        })
        .collect();

    Ok(error::success(data))
}
