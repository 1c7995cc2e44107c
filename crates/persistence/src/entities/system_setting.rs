//! Key-value setting entity (database row mapping).

use sqlx::FromRow;

use domain::models::SystemSetting;

/// Database row mapping for the system_setting table.
#[derive(Debug, Clone, FromRow)]
pub struct SystemSettingEntity {
    pub key: String,
    pub value: String,
}

impl From<SystemSettingEntity> for SystemSetting {
    fn from(entity: SystemSettingEntity) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
        }
    }
}
