//! Execution-roster entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{Penugasan, PenugasanDetail, StatusPenugasan};

/// Database row mapping for the penugasan table.
#[derive(Debug, Clone, FromRow)]
pub struct PenugasanEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub status_penugasan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PenugasanEntity> for Penugasan {
    fn from(entity: PenugasanEntity) -> Self {
        Self {
            id: entity.id,
            id_subkegiatan: entity.id_subkegiatan,
            id_pengawas: entity.id_pengawas,
            status_penugasan: StatusPenugasan::from_str(&entity.status_penugasan)
                .unwrap_or(StatusPenugasan::Menunggu),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Header row joined with display fields and member count.
#[derive(Debug, Clone, FromRow)]
pub struct PenugasanDetailEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub status_penugasan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub nama_pengawas: String,
    pub jumlah_anggota: i64,
}

impl From<PenugasanDetailEntity> for PenugasanDetail {
    fn from(entity: PenugasanDetailEntity) -> Self {
        Self {
            penugasan: Penugasan {
                id: entity.id,
                id_subkegiatan: entity.id_subkegiatan,
                id_pengawas: entity.id_pengawas,
                status_penugasan: StatusPenugasan::from_str(&entity.status_penugasan)
                    .unwrap_or(StatusPenugasan::Menunggu),
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
            nama_subkegiatan: entity.nama_subkegiatan,
            nama_kegiatan: entity.nama_kegiatan,
            nama_pengawas: entity.nama_pengawas,
            jumlah_anggota: entity.jumlah_anggota,
        }
    }
}

/// Database row mapping for the kelompok_penugasan table.
#[derive(Debug, Clone, FromRow)]
pub struct KelompokPenugasanEntity {
    pub id: i64,
    pub id_penugasan: i64,
    pub id_mitra: i64,
    pub kode_jabatan: String,
    pub volume_tugas: i32,
    pub created_at: DateTime<Utc>,
}
