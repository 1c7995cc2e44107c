//! Activity (kegiatan) and scheduled sub-activity (subkegiatan) models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level activity/survey.
#[derive(Debug, Clone, Serialize)]
pub struct Kegiatan {
    pub id: i64,
    pub nama_kegiatan: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scheduled sub-activity. The id follows the `sub<N>` pattern and is
/// allocated from the current maximum numeric suffix at insert time.
#[derive(Debug, Clone, Serialize)]
pub struct Subkegiatan {
    pub id: String,
    pub id_kegiatan: i64,
    pub nama_subkegiatan: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_berakhir: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sub-activity joined with its parent activity name.
#[derive(Debug, Clone, Serialize)]
pub struct SubkegiatanDenganKegiatan {
    #[serde(flatten)]
    pub subkegiatan: Subkegiatan,
    pub nama_kegiatan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateKegiatanRequest {
    #[validate(length(min = 1, max = 200, message = "Nama kegiatan wajib diisi"))]
    pub nama_kegiatan: String,

    pub deskripsi: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateKegiatanRequest {
    #[validate(length(min = 1, max = 200, message = "Nama kegiatan wajib diisi"))]
    pub nama_kegiatan: Option<String>,

    pub deskripsi: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubkegiatanRequest {
    pub id_kegiatan: i64,

    #[validate(length(min = 1, max = 200, message = "Nama subkegiatan wajib diisi"))]
    pub nama_subkegiatan: String,

    pub tanggal_mulai: NaiveDate,
    pub tanggal_berakhir: NaiveDate,

    #[validate(length(max = 50, message = "Status maksimal 50 karakter"))]
    pub status: Option<String>,
}

impl CreateSubkegiatanRequest {
    /// Dates must form a non-empty window.
    pub fn check_dates(&self) -> Result<(), String> {
        if self.tanggal_berakhir < self.tanggal_mulai {
            return Err("Tanggal berakhir tidak boleh sebelum tanggal mulai".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubkegiatanRequest {
    pub id_kegiatan: Option<i64>,

    #[validate(length(min = 1, max = 200, message = "Nama subkegiatan wajib diisi"))]
    pub nama_subkegiatan: Option<String>,

    pub tanggal_mulai: Option<NaiveDate>,
    pub tanggal_berakhir: Option<NaiveDate>,

    #[validate(length(max = 50, message = "Status maksimal 50 karakter"))]
    pub status: Option<String>,
}

/// Query filter for the sub-activity listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SubkegiatanQuery {
    pub id_kegiatan: Option<i64>,
    pub tahun: Option<String>,
}

/// Parses the numeric suffix out of a `sub<N>` identifier.
pub fn parse_sub_id(id: &str) -> Option<i64> {
    id.strip_prefix("sub").and_then(|n| n.parse::<i64>().ok())
}

/// Formats the next sub-activity identifier from the current max suffix.
pub fn next_sub_id(max_suffix: i64) -> String {
    format!("sub{}", max_suffix + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sub_id() {
        assert_eq!(parse_sub_id("sub12"), Some(12));
        assert_eq!(parse_sub_id("sub1"), Some(1));
        assert_eq!(parse_sub_id("sub"), None);
        assert_eq!(parse_sub_id("subx"), None);
        assert_eq!(parse_sub_id("12"), None);
    }

    #[test]
    fn test_next_sub_id() {
        assert_eq!(next_sub_id(0), "sub1");
        assert_eq!(next_sub_id(12), "sub13");
    }

    #[test]
    fn test_sub_id_sequence_roundtrip() {
        let next = next_sub_id(parse_sub_id("sub41").unwrap());
        assert_eq!(next, "sub42");
    }

    #[test]
    fn test_create_subkegiatan_date_window() {
        let request = CreateSubkegiatanRequest {
            id_kegiatan: 1,
            nama_subkegiatan: "Pencacahan Lapangan".to_string(),
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            tanggal_berakhir: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            status: None,
        };
        assert!(request.check_dates().is_err());
    }

    #[test]
    fn test_create_subkegiatan_same_day_ok() {
        let request = CreateSubkegiatanRequest {
            id_kegiatan: 1,
            nama_subkegiatan: "Briefing".to_string(),
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            tanggal_berakhir: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status: None,
        };
        assert!(request.check_dates().is_ok());
    }
}
