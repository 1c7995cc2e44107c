//! SPK-setting repository for per-period letter metadata operations.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entities::SpkSettingEntity;
use crate::metrics::QueryTimer;

/// Repository for per-period letter-setting database operations.
#[derive(Clone)]
pub struct SpkSettingRepository {
    pool: PgPool,
}

impl SpkSettingRepository {
    /// Creates a new SpkSettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all settings, newest period first.
    pub async fn list(&self) -> Result<Vec<SpkSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_spk_setting");
        let result = sqlx::query_as::<_, SpkSettingEntity>(
            r#"
            SELECT id, periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                   nomor_surat_format, komponen_honor, template_id, created_at, updated_at
            FROM spk_setting
            ORDER BY periode DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a setting by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SpkSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_spk_setting_by_id");
        let result = sqlx::query_as::<_, SpkSettingEntity>(
            r#"
            SELECT id, periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                   nomor_surat_format, komponen_honor, template_id, created_at, updated_at
            FROM spk_setting
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the setting for a period string.
    pub async fn find_by_periode(
        &self,
        periode: &str,
    ) -> Result<Option<SpkSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_spk_setting_by_periode");
        let result = sqlx::query_as::<_, SpkSettingEntity>(
            r#"
            SELECT id, periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                   nomor_surat_format, komponen_honor, template_id, created_at, updated_at
            FROM spk_setting
            WHERE periode = $1
            "#,
        )
        .bind(periode)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a setting. A duplicate period surfaces as a unique violation.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        periode: &str,
        nama_ppk: &str,
        nip_ppk: &str,
        jabatan_ppk: &str,
        tanggal_surat: Option<NaiveDate>,
        nomor_surat_format: Option<&str>,
        komponen_honor: Option<&str>,
        template_id: Option<i64>,
    ) -> Result<SpkSettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_spk_setting");
        let result = sqlx::query_as::<_, SpkSettingEntity>(
            r#"
            INSERT INTO spk_setting (periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                                     nomor_surat_format, komponen_honor, template_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                      nomor_surat_format, komponen_honor, template_id, created_at, updated_at
            "#,
        )
        .bind(periode)
        .bind(nama_ppk)
        .bind(nip_ppk)
        .bind(jabatan_ppk)
        .bind(tanggal_surat)
        .bind(nomor_surat_format)
        .bind(komponen_honor)
        .bind(template_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a setting. NULL arguments leave the column untouched.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        nama_ppk: Option<&str>,
        nip_ppk: Option<&str>,
        jabatan_ppk: Option<&str>,
        tanggal_surat: Option<NaiveDate>,
        nomor_surat_format: Option<&str>,
        komponen_honor: Option<&str>,
        template_id: Option<i64>,
    ) -> Result<Option<SpkSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_spk_setting");
        let result = sqlx::query_as::<_, SpkSettingEntity>(
            r#"
            UPDATE spk_setting
            SET
                nama_ppk = COALESCE($2, nama_ppk),
                nip_ppk = COALESCE($3, nip_ppk),
                jabatan_ppk = COALESCE($4, jabatan_ppk),
                tanggal_surat = COALESCE($5, tanggal_surat),
                nomor_surat_format = COALESCE($6, nomor_surat_format),
                komponen_honor = COALESCE($7, komponen_honor),
                template_id = COALESCE($8, template_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, periode, nama_ppk, nip_ppk, jabatan_ppk, tanggal_surat,
                      nomor_surat_format, komponen_honor, template_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(nama_ppk)
        .bind(nip_ppk)
        .bind(jabatan_ppk)
        .bind(tanggal_surat)
        .bind(nomor_surat_format)
        .bind(komponen_honor)
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a setting.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_spk_setting");
        let result = sqlx::query("DELETE FROM spk_setting WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: SpkSettingRepository tests require a database connection and
    // are covered by integration tests.
}
