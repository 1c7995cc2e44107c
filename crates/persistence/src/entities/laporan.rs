//! Reporting row mappings: aggregated honor totals and recap buckets.

use rust_decimal::Decimal;
use sqlx::FromRow;

/// One partner's summed honor over the requested window (execution side).
#[derive(Debug, Clone, FromRow)]
pub struct TotalHonorMitraEntity {
    pub id_mitra: i64,
    pub nama_lengkap: String,
    pub nik: String,
    pub total_honor: Decimal,
}

/// One month bucket over the planning rosters.
#[derive(Debug, Clone, FromRow)]
pub struct RekapBulanEntity {
    pub bulan: i32,
    pub jumlah_mitra: i64,
    pub total_honor: Decimal,
}

/// One contributing planning line in the per-partner drill-down.
#[derive(Debug, Clone, FromRow)]
pub struct RekapDetailEntity {
    pub id_subkegiatan: String,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub kode_jabatan: String,
    pub nama_jabatan: String,
    pub volume_tugas: i32,
    pub tarif: Decimal,
    pub total_honor: Decimal,
}
