//! Field-partner entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Mitra, StatusTahun, TahunAktif};

/// Database row mapping for the mitra table.
#[derive(Debug, Clone, FromRow)]
pub struct MitraEntity {
    pub id: i64,
    pub nama_lengkap: String,
    pub nik: String,
    pub sobat_id: Option<String>,
    pub alamat: Option<String>,
    pub nomor_hp: Option<String>,
    pub email: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub pendidikan: Option<String>,
    pub pekerjaan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MitraEntity> for Mitra {
    fn from(entity: MitraEntity) -> Self {
        Self {
            id: entity.id,
            nama_lengkap: entity.nama_lengkap,
            nik: entity.nik,
            sobat_id: entity.sobat_id,
            alamat: entity.alamat,
            nomor_hp: entity.nomor_hp,
            email: entity.email,
            jenis_kelamin: entity.jenis_kelamin,
            pendidikan: entity.pendidikan,
            pekerjaan: entity.pekerjaan,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the tahun_aktif table.
#[derive(Debug, Clone, FromRow)]
pub struct TahunAktifEntity {
    pub id: i64,
    pub mitra_id: i64,
    pub tahun: String,
    pub status: String,
}

impl From<TahunAktifEntity> for TahunAktif {
    fn from(entity: TahunAktifEntity) -> Self {
        Self {
            id: entity.id,
            mitra_id: entity.mitra_id,
            tahun: entity.tahun,
            status: if entity.status == "aktif" {
                StatusTahun::Aktif
            } else {
                StatusTahun::NonAktif
            },
        }
    }
}
