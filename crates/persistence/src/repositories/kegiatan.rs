//! Kegiatan repository for activity and sub-activity database operations.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entities::{KegiatanEntity, SubkegiatanDenganKegiatanEntity, SubkegiatanEntity};
use crate::metrics::QueryTimer;

/// Repository for activity-related database operations.
#[derive(Clone)]
pub struct KegiatanRepository {
    pool: PgPool,
}

impl KegiatanRepository {
    /// Creates a new KegiatanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all activities, newest first.
    pub async fn list(&self) -> Result<Vec<KegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_kegiatan");
        let result = sqlx::query_as::<_, KegiatanEntity>(
            r#"
            SELECT id, nama_kegiatan, deskripsi, created_at, updated_at
            FROM kegiatan
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an activity by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<KegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_kegiatan_by_id");
        let result = sqlx::query_as::<_, KegiatanEntity>(
            r#"
            SELECT id, nama_kegiatan, deskripsi, created_at, updated_at
            FROM kegiatan
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new activity.
    pub async fn create(
        &self,
        nama_kegiatan: &str,
        deskripsi: Option<&str>,
    ) -> Result<KegiatanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_kegiatan");
        let result = sqlx::query_as::<_, KegiatanEntity>(
            r#"
            INSERT INTO kegiatan (nama_kegiatan, deskripsi)
            VALUES ($1, $2)
            RETURNING id, nama_kegiatan, deskripsi, created_at, updated_at
            "#,
        )
        .bind(nama_kegiatan)
        .bind(deskripsi)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an activity. NULL arguments leave the column untouched.
    pub async fn update(
        &self,
        id: i64,
        nama_kegiatan: Option<&str>,
        deskripsi: Option<&str>,
    ) -> Result<Option<KegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_kegiatan");
        let result = sqlx::query_as::<_, KegiatanEntity>(
            r#"
            UPDATE kegiatan
            SET
                nama_kegiatan = COALESCE($2, nama_kegiatan),
                deskripsi = COALESCE($3, deskripsi),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, nama_kegiatan, deskripsi, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(nama_kegiatan)
        .bind(deskripsi)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an activity. Sub-activities cascade.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_kegiatan");
        let result = sqlx::query("DELETE FROM kegiatan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List sub-activities joined with the parent activity name,
    /// optionally filtered by activity and/or start-date year.
    pub async fn list_subkegiatan(
        &self,
        id_kegiatan: Option<i64>,
        tahun: Option<i32>,
    ) -> Result<Vec<SubkegiatanDenganKegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_subkegiatan");
        let result = sqlx::query_as::<_, SubkegiatanDenganKegiatanEntity>(
            r#"
            SELECT s.id, s.id_kegiatan, s.nama_subkegiatan, s.tanggal_mulai,
                   s.tanggal_berakhir, s.status, s.created_at, s.updated_at,
                   k.nama_kegiatan
            FROM subkegiatan s
            JOIN kegiatan k ON k.id = s.id_kegiatan
            WHERE ($1::bigint IS NULL OR s.id_kegiatan = $1)
              AND ($2::int IS NULL OR EXTRACT(YEAR FROM s.tanggal_mulai)::int = $2)
            ORDER BY s.tanggal_mulai DESC
            "#,
        )
        .bind(id_kegiatan)
        .bind(tahun)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a sub-activity by its `sub<N>` id.
    pub async fn find_subkegiatan(
        &self,
        id: &str,
    ) -> Result<Option<SubkegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_subkegiatan_by_id");
        let result = sqlx::query_as::<_, SubkegiatanEntity>(
            r#"
            SELECT id, id_kegiatan, nama_subkegiatan, tanggal_mulai,
                   tanggal_berakhir, status, created_at, updated_at
            FROM subkegiatan
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a sub-activity, allocating the next `sub<N>` id from the
    /// current maximum numeric suffix inside the same transaction.
    pub async fn create_subkegiatan(
        &self,
        id_kegiatan: i64,
        nama_subkegiatan: &str,
        tanggal_mulai: NaiveDate,
        tanggal_berakhir: NaiveDate,
        status: &str,
    ) -> Result<SubkegiatanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_subkegiatan");
        let mut tx = self.pool.begin().await?;

        let max_suffix = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(MAX((substring(id from 4))::bigint), 0)
            FROM subkegiatan
            WHERE id ~ '^sub[0-9]+$'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let id = format!("sub{}", max_suffix + 1);

        let result = sqlx::query_as::<_, SubkegiatanEntity>(
            r#"
            INSERT INTO subkegiatan (id, id_kegiatan, nama_subkegiatan,
                                     tanggal_mulai, tanggal_berakhir, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, id_kegiatan, nama_subkegiatan, tanggal_mulai,
                      tanggal_berakhir, status, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(id_kegiatan)
        .bind(nama_subkegiatan)
        .bind(tanggal_mulai)
        .bind(tanggal_berakhir)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(result)
    }

    /// Update a sub-activity. NULL arguments leave the column untouched.
    pub async fn update_subkegiatan(
        &self,
        id: &str,
        id_kegiatan: Option<i64>,
        nama_subkegiatan: Option<&str>,
        tanggal_mulai: Option<NaiveDate>,
        tanggal_berakhir: Option<NaiveDate>,
        status: Option<&str>,
    ) -> Result<Option<SubkegiatanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_subkegiatan");
        let result = sqlx::query_as::<_, SubkegiatanEntity>(
            r#"
            UPDATE subkegiatan
            SET
                id_kegiatan = COALESCE($2, id_kegiatan),
                nama_subkegiatan = COALESCE($3, nama_subkegiatan),
                tanggal_mulai = COALESCE($4, tanggal_mulai),
                tanggal_berakhir = COALESCE($5, tanggal_berakhir),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, id_kegiatan, nama_subkegiatan, tanggal_mulai,
                      tanggal_berakhir, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(id_kegiatan)
        .bind(nama_subkegiatan)
        .bind(tanggal_mulai)
        .bind(tanggal_berakhir)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a sub-activity. Rosters and rates cascade.
    pub async fn delete_subkegiatan(&self, id: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_subkegiatan");
        let result = sqlx::query("DELETE FROM subkegiatan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: KegiatanRepository tests require a database connection and are
    // covered by integration tests.
}
