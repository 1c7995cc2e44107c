//! Monthly honor-cap rule (aturan periode) models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One cap rule per year. `batas_honor` is the *monthly* ceiling; yearly
/// views multiply it by twelve.
#[derive(Debug, Clone, Serialize)]
pub struct AturanPeriode {
    pub id: i64,
    pub periode: String,
    pub batas_honor: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAturanPeriodeRequest {
    #[validate(custom(function = "shared::validation::validate_tahun"))]
    pub periode: String,

    pub batas_honor: Decimal,
}

impl CreateAturanPeriodeRequest {
    pub fn check_batas(&self) -> Result<(), String> {
        if self.batas_honor <= Decimal::ZERO {
            return Err("Batas honor harus lebih dari nol".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAturanPeriodeRequest {
    pub batas_honor: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_aturan_valid() {
        let request = CreateAturanPeriodeRequest {
            periode: "2025".to_string(),
            batas_honor: Decimal::from(4_000_000),
        };
        assert!(request.validate().is_ok());
        assert!(request.check_batas().is_ok());
    }

    #[test]
    fn test_create_aturan_bad_periode() {
        let request = CreateAturanPeriodeRequest {
            periode: "2025-01".to_string(),
            batas_honor: Decimal::from(4_000_000),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_aturan_zero_batas() {
        let request = CreateAturanPeriodeRequest {
            periode: "2025".to_string(),
            batas_honor: Decimal::ZERO,
        };
        assert!(request.check_batas().is_err());
    }
}
