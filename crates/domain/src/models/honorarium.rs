//! Honor-rate (honorarium) models: one rate per (sub-activity, position).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct Honorarium {
    pub id: i64,
    pub id_subkegiatan: String,
    pub kode_jabatan: String,
    pub tarif: Decimal,
    pub id_satuan: i64,
    /// Quota of units a single partner may be assigned.
    pub basis_volume: i32,
    /// Budget line code the payout is charged against.
    pub beban_anggaran: Option<String>,
}

/// Rate joined with position and unit names for listing.
#[derive(Debug, Clone, Serialize)]
pub struct HonorariumDetail {
    #[serde(flatten)]
    pub honorarium: Honorarium,
    pub nama_jabatan: String,
    pub nama_satuan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHonorariumRequest {
    #[validate(length(min = 1, message = "Subkegiatan wajib diisi"))]
    pub id_subkegiatan: String,

    #[validate(length(min = 1, message = "Kode jabatan wajib diisi"))]
    pub kode_jabatan: String,

    pub tarif: Decimal,
    pub id_satuan: i64,

    #[validate(range(min = 1, message = "Basis volume minimal 1"))]
    pub basis_volume: i32,

    #[validate(length(max = 50, message = "Beban anggaran maksimal 50 karakter"))]
    pub beban_anggaran: Option<String>,
}

impl CreateHonorariumRequest {
    pub fn check_tarif(&self) -> Result<(), String> {
        if self.tarif < Decimal::ZERO {
            return Err("Tarif tidak boleh negatif".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHonorariumRequest {
    pub tarif: Option<Decimal>,
    pub id_satuan: Option<i64>,

    #[validate(range(min = 1, message = "Basis volume minimal 1"))]
    pub basis_volume: Option<i32>,

    #[validate(length(max = 50, message = "Beban anggaran maksimal 50 karakter"))]
    pub beban_anggaran: Option<String>,
}

/// Query filter for the rate listing.
#[derive(Debug, Clone, Deserialize)]
pub struct HonorariumQuery {
    pub id_subkegiatan: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateHonorariumRequest {
        CreateHonorariumRequest {
            id_subkegiatan: "sub3".to_string(),
            kode_jabatan: "PPL".to_string(),
            tarif: Decimal::from(75_000),
            id_satuan: 1,
            basis_volume: 40,
            beban_anggaran: Some("521213".to_string()),
        }
    }

    #[test]
    fn test_create_honorarium_valid() {
        let request = valid_request();
        assert!(request.validate().is_ok());
        assert!(request.check_tarif().is_ok());
    }

    #[test]
    fn test_create_honorarium_zero_volume() {
        let mut request = valid_request();
        request.basis_volume = 0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_honorarium_negative_tarif() {
        let mut request = valid_request();
        request.tarif = Decimal::from(-1);
        assert!(request.check_tarif().is_err());
    }
}
