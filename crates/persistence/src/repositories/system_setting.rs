//! System-setting repository for key-value config operations.

use sqlx::PgPool;

use crate::entities::SystemSettingEntity;
use crate::metrics::QueryTimer;

/// Repository for key-value setting database operations.
#[derive(Clone)]
pub struct SystemSettingRepository {
    pool: PgPool,
}

impl SystemSettingRepository {
    /// Creates a new SystemSettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all settings.
    pub async fn list(&self) -> Result<Vec<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_system_setting");
        let result = sqlx::query_as::<_, SystemSettingEntity>(
            r#"
            SELECT key, value
            FROM system_setting
            ORDER BY key ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Settings restricted to the given keys (for the public endpoint).
    pub async fn get_many(&self, keys: &[&str]) -> Result<Vec<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_system_settings");
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let result = sqlx::query_as::<_, SystemSettingEntity>(
            r#"
            SELECT key, value
            FROM system_setting
            WHERE key = ANY($1)
            ORDER BY key ASC
            "#,
        )
        .bind(&keys)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one setting.
    pub async fn get(&self, key: &str) -> Result<Option<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_system_setting");
        let result = sqlx::query_as::<_, SystemSettingEntity>(
            r#"
            SELECT key, value
            FROM system_setting
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert or overwrite one setting.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<SystemSettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_system_setting");
        let result = sqlx::query_as::<_, SystemSettingEntity>(
            r#"
            INSERT INTO system_setting (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            RETURNING key, value
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete one setting.
    pub async fn delete(&self, key: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_system_setting");
        let result = sqlx::query("DELETE FROM system_setting WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: SystemSettingRepository tests require a database connection and
    // are covered by integration tests.
}
