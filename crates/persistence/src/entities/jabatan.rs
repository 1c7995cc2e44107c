//! Position catalog entity (database row mapping).

use sqlx::FromRow;

use domain::models::JabatanMitra;

/// Database row mapping for the jabatan_mitra table.
#[derive(Debug, Clone, FromRow)]
pub struct JabatanMitraEntity {
    pub kode_jabatan: String,
    pub nama_jabatan: String,
}

impl From<JabatanMitraEntity> for JabatanMitra {
    fn from(entity: JabatanMitraEntity) -> Self {
        Self {
            kode_jabatan: entity.kode_jabatan,
            nama_jabatan: entity.nama_jabatan,
        }
    }
}
