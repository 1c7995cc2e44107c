//! Jabatan repository for position-catalog database operations.

use sqlx::PgPool;

use crate::entities::JabatanMitraEntity;
use crate::metrics::QueryTimer;

/// Repository for position-catalog database operations.
#[derive(Clone)]
pub struct JabatanRepository {
    pool: PgPool,
}

impl JabatanRepository {
    /// Creates a new JabatanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all positions by code.
    pub async fn list(&self) -> Result<Vec<JabatanMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_jabatan");
        let result = sqlx::query_as::<_, JabatanMitraEntity>(
            r#"
            SELECT kode_jabatan, nama_jabatan
            FROM jabatan_mitra
            ORDER BY kode_jabatan ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a position by its code.
    pub async fn find_by_kode(
        &self,
        kode_jabatan: &str,
    ) -> Result<Option<JabatanMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_jabatan_by_kode");
        let result = sqlx::query_as::<_, JabatanMitraEntity>(
            r#"
            SELECT kode_jabatan, nama_jabatan
            FROM jabatan_mitra
            WHERE kode_jabatan = $1
            "#,
        )
        .bind(kode_jabatan)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a position. A duplicate code surfaces as a unique violation.
    pub async fn create(
        &self,
        kode_jabatan: &str,
        nama_jabatan: &str,
    ) -> Result<JabatanMitraEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_jabatan");
        let result = sqlx::query_as::<_, JabatanMitraEntity>(
            r#"
            INSERT INTO jabatan_mitra (kode_jabatan, nama_jabatan)
            VALUES ($1, $2)
            RETURNING kode_jabatan, nama_jabatan
            "#,
        )
        .bind(kode_jabatan)
        .bind(nama_jabatan)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rename a position.
    pub async fn update(
        &self,
        kode_jabatan: &str,
        nama_jabatan: Option<&str>,
    ) -> Result<Option<JabatanMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_jabatan");
        let result = sqlx::query_as::<_, JabatanMitraEntity>(
            r#"
            UPDATE jabatan_mitra
            SET nama_jabatan = COALESCE($2, nama_jabatan)
            WHERE kode_jabatan = $1
            RETURNING kode_jabatan, nama_jabatan
            "#,
        )
        .bind(kode_jabatan)
        .bind(nama_jabatan)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a position. A foreign-key RESTRICT violation (still
    /// referenced by honor rows or rosters) propagates to the caller,
    /// which maps it to a conflict.
    pub async fn delete(&self, kode_jabatan: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_jabatan");
        let result = sqlx::query("DELETE FROM jabatan_mitra WHERE kode_jabatan = $1")
            .bind(kode_jabatan)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: JabatanRepository tests require a database connection and are
    // covered by integration tests.
}
