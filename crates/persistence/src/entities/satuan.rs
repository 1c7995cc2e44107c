//! Unit-of-measure entity (database row mapping).

use sqlx::FromRow;

use domain::models::SatuanKegiatan;

/// Database row mapping for the satuan_kegiatan table.
#[derive(Debug, Clone, FromRow)]
pub struct SatuanKegiatanEntity {
    pub id: i64,
    pub nama_satuan: String,
    pub alias: Option<String>,
}

impl From<SatuanKegiatanEntity> for SatuanKegiatan {
    fn from(entity: SatuanKegiatanEntity) -> Self {
        Self {
            id: entity.id,
            nama_satuan: entity.nama_satuan,
            alias: entity.alias,
        }
    }
}
