//! Honorarium repository for pay-rate database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::entities::{HonorariumDetailEntity, HonorariumEntity, JabatanMitraEntity};
use crate::metrics::QueryTimer;

/// Repository for honor-rate database operations.
#[derive(Clone)]
pub struct HonorariumRepository {
    pool: PgPool,
}

impl HonorariumRepository {
    /// Creates a new HonorariumRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List rates joined with position and unit names, optionally filtered
    /// by sub-activity.
    pub async fn list_detail(
        &self,
        id_subkegiatan: Option<&str>,
    ) -> Result<Vec<HonorariumDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_honorarium_detail");
        let result = sqlx::query_as::<_, HonorariumDetailEntity>(
            r#"
            SELECT h.id, h.id_subkegiatan, h.kode_jabatan, h.tarif, h.id_satuan,
                   h.basis_volume, h.beban_anggaran,
                   j.nama_jabatan, s.nama_satuan
            FROM honorarium h
            JOIN jabatan_mitra j ON j.kode_jabatan = h.kode_jabatan
            JOIN satuan_kegiatan s ON s.id = h.id_satuan
            WHERE ($1::text IS NULL OR h.id_subkegiatan = $1)
            ORDER BY h.id_subkegiatan, h.kode_jabatan
            "#,
        )
        .bind(id_subkegiatan)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a rate by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<HonorariumEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_honorarium_by_id");
        let result = sqlx::query_as::<_, HonorariumEntity>(
            r#"
            SELECT id, id_subkegiatan, kode_jabatan, tarif, id_satuan,
                   basis_volume, beban_anggaran
            FROM honorarium
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a rate already exists for the (sub-activity, position) pair.
    pub async fn exists_for_pair(
        &self,
        id_subkegiatan: &str,
        kode_jabatan: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_honorarium_pair");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM honorarium
                WHERE id_subkegiatan = $1 AND kode_jabatan = $2
            )
            "#,
        )
        .bind(id_subkegiatan)
        .bind(kode_jabatan)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a rate for a (sub-activity, position) pair.
    pub async fn create(
        &self,
        id_subkegiatan: &str,
        kode_jabatan: &str,
        tarif: Decimal,
        id_satuan: i64,
        basis_volume: i32,
        beban_anggaran: Option<&str>,
    ) -> Result<HonorariumEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_honorarium");
        let result = sqlx::query_as::<_, HonorariumEntity>(
            r#"
            INSERT INTO honorarium (id_subkegiatan, kode_jabatan, tarif, id_satuan,
                                    basis_volume, beban_anggaran)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, id_subkegiatan, kode_jabatan, tarif, id_satuan,
                      basis_volume, beban_anggaran
            "#,
        )
        .bind(id_subkegiatan)
        .bind(kode_jabatan)
        .bind(tarif)
        .bind(id_satuan)
        .bind(basis_volume)
        .bind(beban_anggaran)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a rate. NULL arguments leave the column untouched.
    pub async fn update(
        &self,
        id: i64,
        tarif: Option<Decimal>,
        id_satuan: Option<i64>,
        basis_volume: Option<i32>,
        beban_anggaran: Option<&str>,
    ) -> Result<Option<HonorariumEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_honorarium");
        let result = sqlx::query_as::<_, HonorariumEntity>(
            r#"
            UPDATE honorarium
            SET
                tarif = COALESCE($2, tarif),
                id_satuan = COALESCE($3, id_satuan),
                basis_volume = COALESCE($4, basis_volume),
                beban_anggaran = COALESCE($5, beban_anggaran)
            WHERE id = $1
            RETURNING id, id_subkegiatan, kode_jabatan, tarif, id_satuan,
                      basis_volume, beban_anggaran
            "#,
        )
        .bind(id)
        .bind(tarif)
        .bind(id_satuan)
        .bind(basis_volume)
        .bind(beban_anggaran)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a rate.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_honorarium");
        let result = sqlx::query("DELETE FROM honorarium WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Positions that have a configured rate on a sub-activity, used by
    /// the roster preview import to fuzzy-match free-text position names.
    pub async fn jabatan_for_subkegiatan(
        &self,
        id_subkegiatan: &str,
    ) -> Result<Vec<JabatanMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("jabatan_for_subkegiatan");
        let result = sqlx::query_as::<_, JabatanMitraEntity>(
            r#"
            SELECT j.kode_jabatan, j.nama_jabatan
            FROM honorarium h
            JOIN jabatan_mitra j ON j.kode_jabatan = h.kode_jabatan
            WHERE h.id_subkegiatan = $1
            ORDER BY j.kode_jabatan
            "#,
        )
        .bind(id_subkegiatan)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: HonorariumRepository tests require a database connection and
    // are covered by integration tests.
}
