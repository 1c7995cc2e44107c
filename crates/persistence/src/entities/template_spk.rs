//! Letter-template entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{BagianTeks, JenisBagian, MasterTemplateSpk, Pasal};

/// Database row mapping for the master_template_spk table.
#[derive(Debug, Clone, FromRow)]
pub struct MasterTemplateSpkEntity {
    pub id: i64,
    pub nama_template: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MasterTemplateSpkEntity> for MasterTemplateSpk {
    fn from(entity: MasterTemplateSpkEntity) -> Self {
        Self {
            id: entity.id,
            nama_template: entity.nama_template,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the template_bagian_teks table.
#[derive(Debug, Clone, FromRow)]
pub struct BagianTeksEntity {
    pub id: i64,
    pub template_id: i64,
    pub jenis_bagian: String,
    pub isi_teks: String,
}

impl From<BagianTeksEntity> for BagianTeks {
    fn from(entity: BagianTeksEntity) -> Self {
        Self {
            jenis_bagian: JenisBagian::from_str(&entity.jenis_bagian)
                .unwrap_or(JenisBagian::Pembuka),
            isi_teks: entity.isi_teks,
        }
    }
}

/// Database row mapping for the template_pasal table.
#[derive(Debug, Clone, FromRow)]
pub struct PasalEntity {
    pub id: i64,
    pub template_id: i64,
    pub nomor_pasal: i32,
    pub judul_pasal: String,
    pub isi_pasal: String,
    pub urutan: i32,
}

impl From<PasalEntity> for Pasal {
    fn from(entity: PasalEntity) -> Self {
        Self {
            nomor_pasal: entity.nomor_pasal,
            judul_pasal: entity.judul_pasal,
            isi_pasal: entity.isi_pasal,
            urutan: entity.urutan,
        }
    }
}
