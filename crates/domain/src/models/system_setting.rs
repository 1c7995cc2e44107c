//! Key-value application settings (logo, background image paths).

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Setting keys readable without authentication.
pub const PUBLIC_KEYS: [&str; 2] = ["logo_path", "background_path"];

#[derive(Debug, Clone, Serialize)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSettingRequest {
    #[validate(length(min = 1, max = 100, message = "Key wajib diisi"))]
    pub key: String,

    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_setting_valid() {
        let request = UpsertSettingRequest {
            key: "logo_path".to_string(),
            value: "/storage/logo.png".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_upsert_setting_empty_key() {
        let request = UpsertSettingRequest {
            key: "".to_string(),
            value: "x".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_public_keys() {
        assert!(PUBLIC_KEYS.contains(&"logo_path"));
        assert!(!PUBLIC_KEYS.contains(&"smtp_password"));
    }
}
