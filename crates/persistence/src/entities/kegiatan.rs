//! Activity and sub-activity entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use domain::models::{Kegiatan, Subkegiatan, SubkegiatanDenganKegiatan};

/// Database row mapping for the kegiatan table.
#[derive(Debug, Clone, FromRow)]
pub struct KegiatanEntity {
    pub id: i64,
    pub nama_kegiatan: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<KegiatanEntity> for Kegiatan {
    fn from(entity: KegiatanEntity) -> Self {
        Self {
            id: entity.id,
            nama_kegiatan: entity.nama_kegiatan,
            deskripsi: entity.deskripsi,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the subkegiatan table.
#[derive(Debug, Clone, FromRow)]
pub struct SubkegiatanEntity {
    pub id: String,
    pub id_kegiatan: i64,
    pub nama_subkegiatan: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_berakhir: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubkegiatanEntity> for Subkegiatan {
    fn from(entity: SubkegiatanEntity) -> Self {
        Self {
            id: entity.id,
            id_kegiatan: entity.id_kegiatan,
            nama_subkegiatan: entity.nama_subkegiatan,
            tanggal_mulai: entity.tanggal_mulai,
            tanggal_berakhir: entity.tanggal_berakhir,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Sub-activity row joined with its parent activity name.
#[derive(Debug, Clone, FromRow)]
pub struct SubkegiatanDenganKegiatanEntity {
    pub id: String,
    pub id_kegiatan: i64,
    pub nama_subkegiatan: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_berakhir: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nama_kegiatan: String,
}

impl From<SubkegiatanDenganKegiatanEntity> for SubkegiatanDenganKegiatan {
    fn from(entity: SubkegiatanDenganKegiatanEntity) -> Self {
        Self {
            subkegiatan: Subkegiatan {
                id: entity.id,
                id_kegiatan: entity.id_kegiatan,
                nama_subkegiatan: entity.nama_subkegiatan,
                tanggal_mulai: entity.tanggal_mulai,
                tanggal_berakhir: entity.tanggal_berakhir,
                status: entity.status,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
            nama_kegiatan: entity.nama_kegiatan,
        }
    }
}
