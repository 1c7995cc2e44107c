//! Satuan repository for unit-of-measure database operations.

use sqlx::PgPool;

use crate::entities::SatuanKegiatanEntity;
use crate::metrics::QueryTimer;

/// Repository for unit-of-measure database operations.
#[derive(Clone)]
pub struct SatuanRepository {
    pool: PgPool,
}

impl SatuanRepository {
    /// Creates a new SatuanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all units by name.
    pub async fn list(&self) -> Result<Vec<SatuanKegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_satuan");
        let result = sqlx::query_as::<_, SatuanKegiatanEntity>(
            r#"
            SELECT id, nama_satuan, alias
            FROM satuan_kegiatan
            ORDER BY nama_satuan ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a unit by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SatuanKegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_satuan_by_id");
        let result = sqlx::query_as::<_, SatuanKegiatanEntity>(
            r#"
            SELECT id, nama_satuan, alias
            FROM satuan_kegiatan
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a unit. A duplicate name surfaces as a unique violation.
    pub async fn create(
        &self,
        nama_satuan: &str,
        alias: Option<&str>,
    ) -> Result<SatuanKegiatanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_satuan");
        let result = sqlx::query_as::<_, SatuanKegiatanEntity>(
            r#"
            INSERT INTO satuan_kegiatan (nama_satuan, alias)
            VALUES ($1, $2)
            RETURNING id, nama_satuan, alias
            "#,
        )
        .bind(nama_satuan)
        .bind(alias)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a unit. NULL arguments leave the column untouched.
    pub async fn update(
        &self,
        id: i64,
        nama_satuan: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Option<SatuanKegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_satuan");
        let result = sqlx::query_as::<_, SatuanKegiatanEntity>(
            r#"
            UPDATE satuan_kegiatan
            SET
                nama_satuan = COALESCE($2, nama_satuan),
                alias = COALESCE($3, alias)
            WHERE id = $1
            RETURNING id, nama_satuan, alias
            "#,
        )
        .bind(id)
        .bind(nama_satuan)
        .bind(alias)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a unit. A RESTRICT violation from referencing honor rows
    /// propagates to the caller.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_satuan");
        let result = sqlx::query("DELETE FROM satuan_kegiatan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: SatuanRepository tests require a database connection and are
    // covered by integration tests.
}
