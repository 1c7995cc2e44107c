//! Partner position (jabatan mitra) catalog models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Position catalog entry. `kode_jabatan` is the natural key referenced by
/// honor rates and roster line items.
#[derive(Debug, Clone, Serialize)]
pub struct JabatanMitra {
    pub kode_jabatan: String,
    pub nama_jabatan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJabatanRequest {
    #[validate(length(min = 1, max = 20, message = "Kode jabatan harus 1-20 karakter"))]
    pub kode_jabatan: String,

    #[validate(length(min = 1, max = 100, message = "Nama jabatan wajib diisi"))]
    pub nama_jabatan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJabatanRequest {
    #[validate(length(min = 1, max = 100, message = "Nama jabatan wajib diisi"))]
    pub nama_jabatan: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_jabatan_valid() {
        let request = CreateJabatanRequest {
            kode_jabatan: "PPL".to_string(),
            nama_jabatan: "Petugas Pendataan Lapangan".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_jabatan_empty_kode() {
        let request = CreateJabatanRequest {
            kode_jabatan: "".to_string(),
            nama_jabatan: "Pengawas".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
