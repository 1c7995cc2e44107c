//! Unit-of-measure (satuan kegiatan) models.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct SatuanKegiatan {
    pub id: i64,
    pub nama_satuan: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSatuanRequest {
    #[validate(length(min = 1, max = 50, message = "Nama satuan wajib diisi"))]
    pub nama_satuan: String,

    #[validate(length(max = 20, message = "Alias maksimal 20 karakter"))]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSatuanRequest {
    #[validate(length(min = 1, max = 50, message = "Nama satuan wajib diisi"))]
    pub nama_satuan: Option<String>,

    #[validate(length(max = 20, message = "Alias maksimal 20 karakter"))]
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_satuan_valid() {
        let request = CreateSatuanRequest {
            nama_satuan: "Dokumen".to_string(),
            alias: Some("dok".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_satuan_empty_name() {
        let request = CreateSatuanRequest {
            nama_satuan: "".to_string(),
            alias: None,
        };
        assert!(request.validate().is_err());
    }
}
