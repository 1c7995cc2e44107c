//! Per-period letter setting entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use domain::models::SpkSetting;

/// Database row mapping for the spk_setting table.
#[derive(Debug, Clone, FromRow)]
pub struct SpkSettingEntity {
    pub id: i64,
    pub periode: String,
    pub nama_ppk: String,
    pub nip_ppk: String,
    pub jabatan_ppk: String,
    pub tanggal_surat: Option<NaiveDate>,
    pub nomor_surat_format: Option<String>,
    pub komponen_honor: Option<String>,
    pub template_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SpkSettingEntity> for SpkSetting {
    fn from(entity: SpkSettingEntity) -> Self {
        Self {
            id: entity.id,
            periode: entity.periode,
            nama_ppk: entity.nama_ppk,
            nip_ppk: entity.nip_ppk,
            jabatan_ppk: entity.jabatan_ppk,
            tanggal_surat: entity.tanggal_surat,
            nomor_surat_format: entity.nomor_surat_format,
            komponen_honor: entity.komponen_honor,
            template_id: entity.template_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
