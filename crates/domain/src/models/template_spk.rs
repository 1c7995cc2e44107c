//! Assignment-letter (SPK) template models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// The five fixed body sections of a letter template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisBagian {
    Pembuka,
    PihakPertama,
    PihakKedua,
    Kesepakatan,
    Penutup,
}

impl JenisBagian {
    pub const ALL: [JenisBagian; 5] = [
        Self::Pembuka,
        Self::PihakPertama,
        Self::PihakKedua,
        Self::Kesepakatan,
        Self::Penutup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pembuka => "pembuka",
            Self::PihakPertama => "pihak_pertama",
            Self::PihakKedua => "pihak_kedua",
            Self::Kesepakatan => "kesepakatan",
            Self::Penutup => "penutup",
        }
    }
}

impl FromStr for JenisBagian {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pembuka" => Ok(Self::Pembuka),
            "pihak_pertama" => Ok(Self::PihakPertama),
            "pihak_kedua" => Ok(Self::PihakKedua),
            "kesepakatan" => Ok(Self::Kesepakatan),
            "penutup" => Ok(Self::Penutup),
            other => Err(format!("Jenis bagian tidak dikenal: {}", other)),
        }
    }
}

/// Template header. At most one row has `is_active = true`, enforced by the
/// transactional activate operation.
#[derive(Debug, Clone, Serialize)]
pub struct MasterTemplateSpk {
    pub id: i64,
    pub nama_template: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Named body section text.
#[derive(Debug, Clone, Serialize)]
pub struct BagianTeks {
    pub jenis_bagian: JenisBagian,
    pub isi_teks: String,
}

/// Numbered article/clause, ordered by `urutan`.
#[derive(Debug, Clone, Serialize)]
pub struct Pasal {
    pub nomor_pasal: i32,
    pub judul_pasal: String,
    pub isi_pasal: String,
    pub urutan: i32,
}

/// Full template: header + sections + ordered articles.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateLengkap {
    #[serde(flatten)]
    pub template: MasterTemplateSpk,
    pub bagian: Vec<BagianTeks>,
    pub pasal: Vec<Pasal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BagianInput {
    pub jenis_bagian: JenisBagian,

    #[validate(length(min = 1, message = "Isi teks wajib diisi"))]
    pub isi_teks: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasalInput {
    #[validate(range(min = 1, message = "Nomor pasal minimal 1"))]
    pub nomor_pasal: i32,

    #[validate(length(min = 1, max = 200, message = "Judul pasal wajib diisi"))]
    pub judul_pasal: String,

    #[validate(length(min = 1, message = "Isi pasal wajib diisi"))]
    pub isi_pasal: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Nama template wajib diisi"))]
    pub nama_template: String,

    #[validate(nested)]
    pub bagian: Option<Vec<BagianInput>>,

    /// Article order is taken from array position, not from `nomor_pasal`.
    #[validate(nested)]
    pub pasal: Option<Vec<PasalInput>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Nama template wajib diisi"))]
    pub nama_template: Option<String>,

    /// Sections present here are upserted by kind; absent kinds untouched.
    #[validate(nested)]
    pub bagian: Option<Vec<BagianInput>>,

    /// When present, the article list is replaced wholesale.
    #[validate(nested)]
    pub pasal: Option<Vec<PasalInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jenis_bagian_roundtrip() {
        for jenis in JenisBagian::ALL {
            assert_eq!(JenisBagian::from_str(jenis.as_str()).unwrap(), jenis);
        }
    }

    #[test]
    fn test_jenis_bagian_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&JenisBagian::PihakPertama).unwrap(),
            "\"pihak_pertama\""
        );
        let parsed: JenisBagian = serde_json::from_str("\"kesepakatan\"").unwrap();
        assert_eq!(parsed, JenisBagian::Kesepakatan);
    }

    #[test]
    fn test_jenis_bagian_unknown() {
        assert!(JenisBagian::from_str("lampiran").is_err());
    }

    #[test]
    fn test_create_template_request_nested() {
        let request = CreateTemplateRequest {
            nama_template: "Template SPK 2025".to_string(),
            bagian: Some(vec![BagianInput {
                jenis_bagian: JenisBagian::Pembuka,
                isi_teks: "Pada hari ini...".to_string(),
            }]),
            pasal: Some(vec![PasalInput {
                nomor_pasal: 1,
                judul_pasal: "Ruang Lingkup".to_string(),
                isi_pasal: "Pihak kedua melaksanakan...".to_string(),
            }]),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_template_request_empty_section_text() {
        let request = CreateTemplateRequest {
            nama_template: "Template".to_string(),
            bagian: Some(vec![BagianInput {
                jenis_bagian: JenisBagian::Penutup,
                isi_teks: "".to_string(),
            }]),
            pasal: None,
        };
        assert!(request.validate().is_err());
    }
}
