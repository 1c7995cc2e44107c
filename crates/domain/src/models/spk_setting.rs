//! Per-period letter metadata (SPK setting) models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signer and numbering metadata for one period (`YYYY-MM`).
#[derive(Debug, Clone, Serialize)]
pub struct SpkSetting {
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

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpkSettingRequest {
    #[validate(custom(function = "shared::validation::validate_periode"))]
    pub periode: String,

    #[validate(length(min = 1, max = 200, message = "Nama PPK wajib diisi"))]
    pub nama_ppk: String,

    #[validate(length(min = 1, max = 30, message = "NIP PPK wajib diisi"))]
    pub nip_ppk: String,

    #[validate(length(min = 1, max = 200, message = "Jabatan PPK wajib diisi"))]
    pub jabatan_ppk: String,

    pub tanggal_surat: Option<NaiveDate>,

    #[validate(length(max = 200, message = "Format nomor surat maksimal 200 karakter"))]
    pub nomor_surat_format: Option<String>,

    pub komponen_honor: Option<String>,
    pub template_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSpkSettingRequest {
    #[validate(length(min = 1, max = 200, message = "Nama PPK wajib diisi"))]
    pub nama_ppk: Option<String>,

    #[validate(length(min = 1, max = 30, message = "NIP PPK wajib diisi"))]
    pub nip_ppk: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Jabatan PPK wajib diisi"))]
    pub jabatan_ppk: Option<String>,

    pub tanggal_surat: Option<NaiveDate>,

    #[validate(length(max = 200, message = "Format nomor surat maksimal 200 karakter"))]
    pub nomor_surat_format: Option<String>,

    pub komponen_honor: Option<String>,
    pub template_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateSpkSettingRequest {
        CreateSpkSettingRequest {
            periode: "2025-03".to_string(),
            nama_ppk: "Dewi Lestari".to_string(),
            nip_ppk: "197001012000032001".to_string(),
            jabatan_ppk: "Pejabat Pembuat Komitmen".to_string(),
            tanggal_surat: None,
            nomor_surat_format: Some("B-{nomor}/BPS/{periode}".to_string()),
            komponen_honor: None,
            template_id: None,
        }
    }

    #[test]
    fn test_create_spk_setting_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_spk_setting_bad_periode() {
        let mut request = valid_request();
        request.periode = "2025-13".to_string();
        assert!(request.validate().is_err());

        request.periode = "2025".to_string();
        assert!(request.validate().is_err());
    }
}
