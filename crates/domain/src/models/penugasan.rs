//! Execution-stage roster (penugasan) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Approval state of an execution roster.
///
/// `Menunggu → Disetujui` is the only transition; only approved rosters
/// count toward honor payout reporting and letter generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPenugasan {
    Menunggu,
    Disetujui,
}

impl StatusPenugasan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menunggu => "menunggu",
            Self::Disetujui => "disetujui",
        }
    }
}

impl FromStr for StatusPenugasan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menunggu" => Ok(Self::Menunggu),
            "disetujui" => Ok(Self::Disetujui),
            other => Err(format!("Status penugasan tidak dikenal: {}", other)),
        }
    }
}

impl std::fmt::Display for StatusPenugasan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution roster header.
#[derive(Debug, Clone, Serialize)]
pub struct Penugasan {
    pub id: i64,
    pub id_subkegiatan: String,
    pub id_pengawas: Uuid,
    pub status_penugasan: StatusPenugasan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Header joined with sub-activity and supervisor display fields.
#[derive(Debug, Clone, Serialize)]
pub struct PenugasanDetail {
    #[serde(flatten)]
    pub penugasan: Penugasan,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub nama_pengawas: String,
    pub jumlah_anggota: i64,
}

/// Execution roster line item as submitted by clients. Volumes must be
/// positive here, unlike planning rows.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnggotaPenugasanInput {
    pub id_mitra: i64,

    #[validate(length(min = 1, message = "Kode jabatan wajib diisi"))]
    pub kode_jabatan: String,

    #[validate(range(min = 1, message = "Volume tugas minimal 1"))]
    pub volume_tugas: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePenugasanRequest {
    #[validate(length(min = 1, message = "Subkegiatan wajib diisi"))]
    pub id_subkegiatan: String,

    pub id_pengawas: Uuid,

    #[validate(nested)]
    pub anggota: Option<Vec<AnggotaPenugasanInput>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePenugasanRequest {
    pub id_pengawas: Option<Uuid>,
}

/// Body for the planning→execution promotion endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportPerencanaanRequest {
    #[validate(length(min = 1, message = "Pilih minimal satu perencanaan"))]
    pub perencanaan_ids: Vec<i64>,
}

/// Outcome summary of one promotion run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPerencanaanResponse {
    pub penugasan_dibuat: u32,
    pub penugasan_diperbarui: u32,
    pub anggota_ditambahkan: u32,
    pub anggota_diperbarui: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [StatusPenugasan::Menunggu, StatusPenugasan::Disetujui] {
            assert_eq!(StatusPenugasan::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&StatusPenugasan::Disetujui).unwrap(),
            "\"disetujui\""
        );
        let parsed: StatusPenugasan = serde_json::from_str("\"menunggu\"").unwrap();
        assert_eq!(parsed, StatusPenugasan::Menunggu);
    }

    #[test]
    fn test_anggota_penugasan_zero_volume_rejected() {
        let input = AnggotaPenugasanInput {
            id_mitra: 1,
            kode_jabatan: "PML".to_string(),
            volume_tugas: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_import_request_empty_rejected() {
        let request = ImportPerencanaanRequest {
            perencanaan_ids: vec![],
        };
        assert!(request.validate().is_err());
    }
}
