//! Planning-stage roster (perencanaan) models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Planning roster header: at most one per sub-activity.
#[derive(Debug, Clone, Serialize)]
pub struct Perencanaan {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Header joined with sub-activity and supervisor display fields.
#[derive(Debug, Clone, Serialize)]
pub struct PerencanaanDetail {
    #[serde(flatten)]
    pub perencanaan: Perencanaan,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub nama_pengawas: String,
    pub jumlah_anggota: i64,
}

/// Roster line item as submitted by clients.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnggotaInput {
    pub id_mitra: i64,

    #[validate(length(min = 1, message = "Kode jabatan wajib diisi"))]
    pub kode_jabatan: String,

    /// Planning volumes may be zero (placeholder rows are allowed).
    #[validate(range(min = 0, message = "Volume tugas tidak boleh negatif"))]
    pub volume_tugas: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerencanaanRequest {
    #[validate(length(min = 1, message = "Subkegiatan wajib diisi"))]
    pub id_subkegiatan: String,

    pub id_pengawas: Uuid,

    /// Optional initial member rows, inserted in the same transaction as
    /// the header.
    #[validate(nested)]
    pub anggota: Option<Vec<AnggotaInput>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePerencanaanRequest {
    pub id_pengawas: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAnggotaRequest {
    #[validate(length(min = 1, message = "Kode jabatan wajib diisi"))]
    pub kode_jabatan: Option<String>,

    #[validate(range(min = 0, message = "Volume tugas tidak boleh negatif"))]
    pub volume_tugas: Option<i32>,
}

/// Member row joined with partner, position, and rate data. `total_honor`
/// is recomputed from the current rate at read time, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct AnggotaDetail {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anggota_input_zero_volume_ok() {
        let input = AnggotaInput {
            id_mitra: 1,
            kode_jabatan: "PPL".to_string(),
            volume_tugas: 0,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_anggota_input_negative_volume() {
        let input = AnggotaInput {
            id_mitra: 1,
            kode_jabatan: "PPL".to_string(),
            volume_tugas: -1,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_perencanaan_nested_validation() {
        let request = CreatePerencanaanRequest {
            id_subkegiatan: "sub7".to_string(),
            id_pengawas: Uuid::new_v4(),
            anggota: Some(vec![AnggotaInput {
                id_mitra: 1,
                kode_jabatan: "".to_string(),
                volume_tugas: 5,
            }]),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_perencanaan_without_members() {
        let request = CreatePerencanaanRequest {
            id_subkegiatan: "sub7".to_string(),
            id_pengawas: Uuid::new_v4(),
            anggota: None,
        };
        assert!(request.validate().is_ok());
    }
}
