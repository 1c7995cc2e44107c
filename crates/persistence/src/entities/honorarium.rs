//! Honor-rate entities (database row mappings).

use rust_decimal::Decimal;
use sqlx::FromRow;

use domain::models::{Honorarium, HonorariumDetail};

/// Database row mapping for the honorarium table.
#[derive(Debug, Clone, FromRow)]
pub struct HonorariumEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub kode_jabatan: String,
    pub tarif: Decimal,
    pub id_satuan: i64,
    pub basis_volume: i32,
    pub beban_anggaran: Option<String>,
}

impl From<HonorariumEntity> for Honorarium {
    fn from(entity: HonorariumEntity) -> Self {
        Self {
            id: entity.id,
            id_subkegiatan: entity.id_subkegiatan,
            kode_jabatan: entity.kode_jabatan,
            tarif: entity.tarif,
            id_satuan: entity.id_satuan,
            basis_volume: entity.basis_volume,
            beban_anggaran: entity.beban_anggaran,
        }
    }
}

/// Rate row joined with position and unit names.
#[derive(Debug, Clone, FromRow)]
pub struct HonorariumDetailEntity {
    pub id: i64,
    pub id_subkegiatan: String,
    pub kode_jabatan: String,
    pub tarif: Decimal,
    pub id_satuan: i64,
    pub basis_volume: i32,
    pub beban_anggaran: Option<String>,
    pub nama_jabatan: String,
    pub nama_satuan: String,
}

impl From<HonorariumDetailEntity> for HonorariumDetail {
    fn from(entity: HonorariumDetailEntity) -> Self {
        Self {
            honorarium: Honorarium {
                id: entity.id,
                id_subkegiatan: entity.id_subkegiatan,
                kode_jabatan: entity.kode_jabatan,
                tarif: entity.tarif,
                id_satuan: entity.id_satuan,
                basis_volume: entity.basis_volume,
                beban_anggaran: entity.beban_anggaran,
            },
            nama_jabatan: entity.nama_jabatan,
            nama_satuan: entity.nama_satuan,
        }
    }
}
