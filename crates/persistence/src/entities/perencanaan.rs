//! Planning-roster entities (database row mappings).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{AnggotaDetail, Perencanaan, PerencanaanDetail};

/// Database row mapping for the perencanaan table.
#[derive(Debug, Clone, FromRow)]
pub struct PerencanaanEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PerencanaanEntity> for Perencanaan {
    fn from(entity: PerencanaanEntity) -> Self {
        Self {
            id: entity.id,
            id_subkegiatan: entity.id_subkegiatan,
            id_pengawas: entity.id_pengawas,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Header row joined with display fields and member count.
#[derive(Debug, Clone, FromRow)]
pub struct PerencanaanDetailEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub nama_pengawas: String,
    pub jumlah_anggota: i64,
}

impl From<PerencanaanDetailEntity> for PerencanaanDetail {
    fn from(entity: PerencanaanDetailEntity) -> Self {
        Self {
            perencanaan: Perencanaan {
                id: entity.id,
                id_subkegiatan: entity.id_subkegiatan,
                id_pengawas: entity.id_pengawas,
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

/// Database row mapping for the kelompok_perencanaan table.
#[derive(Debug, Clone, FromRow)]
pub struct KelompokPerencanaanEntity {
    pub id: i64,
    pub id_perencanaan: i64,
    pub id_mitra: i64,
    pub kode_jabatan: String,
    pub volume_tugas: i32,
}

/// Member row joined with partner, position, and current honor rate.
/// `tarif` and `total_honor` are NULL when no rate is configured for the
/// member's position on this sub-activity.
#[derive(Debug, Clone, FromRow)]
pub struct AnggotaDetailEntity {
    pub id: i64,
    pub id_mitra: i64,
    pub nama_lengkap: String,
    pub nik: String,
    pub sobat_id: Option<String>,
    pub kode_jabatan: String,
    pub nama_jabatan: String,
    pub volume_tugas: i32,
    pub tarif: Option<Decimal>,
    pub total_honor: Option<Decimal>,
}

impl From<AnggotaDetailEntity> for AnggotaDetail {
    fn from(entity: AnggotaDetailEntity) -> Self {
        Self {
            id: entity.id,
            id_mitra: entity.id_mitra,
            nama_lengkap: entity.nama_lengkap,
            nik: entity.nik,
            sobat_id: entity.sobat_id,
            kode_jabatan: entity.kode_jabatan,
            nama_jabatan: entity.nama_jabatan,
            volume_tugas: entity.volume_tugas,
            tarif: entity.tarif,
            total_honor: entity.total_honor,
        }
    }
}
