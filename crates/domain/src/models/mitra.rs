//! Field-partner (mitra) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Activation status for a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTahun {
    #[serde(rename = "aktif")]
    Aktif,
    #[serde(rename = "non-aktif")]
    NonAktif,
}

impl StatusTahun {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aktif => "aktif",
            Self::NonAktif => "non-aktif",
        }
    }
}

impl std::fmt::Display for StatusTahun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field partner.
#[derive(Debug, Clone, Serialize)]
pub struct Mitra {
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

/// Yearly activation record.
#[derive(Debug, Clone, Serialize)]
pub struct TahunAktif {
    pub id: i64,
    pub mitra_id: i64,
    pub tahun: String,
    pub status: StatusTahun,
}

/// Partner plus the activation years attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct MitraDenganTahun {
    #[serde(flatten)]
    pub mitra: Mitra,
    pub tahun_aktif: Vec<TahunAktif>,
}

/// Request body for creating (or upserting by NIK) a partner.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMitraRequest {
    #[validate(length(min = 1, max = 200, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: String,

    #[validate(custom(function = "shared::validation::validate_nik"))]
    pub nik: String,

    #[validate(length(max = 50, message = "Sobat ID maksimal 50 karakter"))]
    pub sobat_id: Option<String>,

    pub alamat: Option<String>,

    #[validate(length(max = 20, message = "Nomor HP maksimal 20 karakter"))]
    pub nomor_hp: Option<String>,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,

    pub jenis_kelamin: Option<String>,
    pub pendidikan: Option<String>,
    pub pekerjaan: Option<String>,

    /// Year to activate the partner for; defaults to the current year.
    #[validate(custom(function = "shared::validation::validate_tahun"))]
    pub tahun: Option<String>,
}

/// Request body for updating a partner. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMitraRequest {
    #[validate(length(min = 1, max = 200, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: Option<String>,

    #[validate(custom(function = "shared::validation::validate_nik"))]
    pub nik: Option<String>,

    #[validate(length(max = 50, message = "Sobat ID maksimal 50 karakter"))]
    pub sobat_id: Option<String>,

    pub alamat: Option<String>,

    #[validate(length(max = 20, message = "Nomor HP maksimal 20 karakter"))]
    pub nomor_hp: Option<String>,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,

    pub jenis_kelamin: Option<String>,
    pub pendidikan: Option<String>,
    pub pekerjaan: Option<String>,
}

/// Query parameters for the free-text partner search.
#[derive(Debug, Clone, Deserialize)]
pub struct MitraSearchQuery {
    pub search: Option<String>,
}

/// Query parameters for the year-scoped paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MitraPaginatedQuery {
    pub tahun: String,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameter selecting a single year for deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct MitraDeleteQuery {
    pub tahun: Option<String>,
}

/// Body for the per-year activation toggle endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AktivasiTahunRequest {
    #[validate(custom(function = "shared::validation::validate_tahun"))]
    pub tahun: String,
}

/// Paginated listing payload with the year-wide active headcount.
#[derive(Debug, Clone, Serialize)]
pub struct MitraPaginatedResponse {
    pub data: Vec<MitraDenganTahun>,
    pub pagination: super::pagination::Pagination,
    pub total_aktif: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_request() -> CreateMitraRequest {
        CreateMitraRequest {
            nama_lengkap: "Budi Santoso".to_string(),
            nik: "3201234567890001".to_string(),
            sobat_id: Some("SBT-001".to_string()),
            alamat: None,
            nomor_hp: Some("081234567890".to_string()),
            email: None,
            jenis_kelamin: None,
            pendidikan: None,
            pekerjaan: None,
            tahun: None,
        }
    }

    #[test]
    fn test_create_mitra_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_mitra_request_bad_nik() {
        let mut request = valid_request();
        request.nik = "123".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_mitra_request_bad_tahun() {
        let mut request = valid_request();
        request.tahun = Some("20x5".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_mitra_request_all_absent() {
        let request = UpdateMitraRequest {
            nama_lengkap: None,
            nik: None,
            sobat_id: None,
            alamat: None,
            nomor_hp: None,
            email: None,
            jenis_kelamin: None,
            pendidikan: None,
            pekerjaan: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_status_tahun_serde() {
        assert_eq!(serde_json::to_string(&StatusTahun::Aktif).unwrap(), "\"aktif\"");
        assert_eq!(
            serde_json::to_string(&StatusTahun::NonAktif).unwrap(),
            "\"non-aktif\""
        );
        let parsed: StatusTahun = serde_json::from_str("\"non-aktif\"").unwrap();
        assert_eq!(parsed, StatusTahun::NonAktif);
    }
}
