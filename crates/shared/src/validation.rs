//! Common validation utilities for Indonesian-format identifiers and periods.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref TAHUN_RE: Regex = Regex::new(r"^\d{4}$").expect("valid regex");
    static ref PERIODE_RE: Regex = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid regex");
    static ref NIK_RE: Regex = Regex::new(r"^\d{16}$").expect("valid regex");
}

/// Validates a 4-digit year string, e.g. "2025".
pub fn validate_tahun(tahun: &str) -> Result<(), ValidationError> {
    if TAHUN_RE.is_match(tahun) {
        Ok(())
    } else {
        let mut err = ValidationError::new("tahun_format");
        err.message = Some("Tahun harus berformat YYYY".into());
        Err(err)
    }
}

/// Validates a period string in `YYYY-MM` form, e.g. "2025-03".
pub fn validate_periode(periode: &str) -> Result<(), ValidationError> {
    if PERIODE_RE.is_match(periode) {
        Ok(())
    } else {
        let mut err = ValidationError::new("periode_format");
        err.message = Some("Periode harus berformat YYYY-MM".into());
        Err(err)
    }
}

/// Validates a 16-digit NIK (national identity number).
pub fn validate_nik(nik: &str) -> Result<(), ValidationError> {
    if NIK_RE.is_match(nik) {
        Ok(())
    } else {
        let mut err = ValidationError::new("nik_format");
        err.message = Some("NIK harus terdiri dari 16 digit".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tahun_ok() {
        assert!(validate_tahun("2025").is_ok());
        assert!(validate_tahun("1999").is_ok());
    }

    #[test]
    fn test_validate_tahun_rejects_garbage() {
        assert!(validate_tahun("25").is_err());
        assert!(validate_tahun("20255").is_err());
        assert!(validate_tahun("abcd").is_err());
        assert!(validate_tahun("").is_err());
    }

    #[test]
    fn test_validate_periode_ok() {
        assert!(validate_periode("2025-01").is_ok());
        assert!(validate_periode("2024-12").is_ok());
    }

    #[test]
    fn test_validate_periode_rejects_bad_month() {
        assert!(validate_periode("2025-00").is_err());
        assert!(validate_periode("2025-13").is_err());
        assert!(validate_periode("2025-1").is_err());
        assert!(validate_periode("2025/01").is_err());
        assert!(validate_periode("202501").is_err());
    }

    #[test]
    fn test_validate_nik() {
        assert!(validate_nik("3201234567890001").is_ok());
        assert!(validate_nik("123").is_err());
        assert!(validate_nik("32012345678900011").is_err());
        assert!(validate_nik("32O1234567890001").is_err());
    }

}
