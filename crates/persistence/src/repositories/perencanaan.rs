//! Perencanaan repository for planning-roster database operations.

use domain::models::AnggotaInput;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    AnggotaDetailEntity, KelompokPerencanaanEntity, PerencanaanDetailEntity, PerencanaanEntity,
};
use crate::metrics::QueryTimer;

/// Repository for planning-roster database operations.
#[derive(Clone)]
pub struct PerencanaanRepository {
    pool: PgPool,
}

impl PerencanaanRepository {
    /// Creates a new PerencanaanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a planning roster already exists for the sub-activity.
    pub async fn exists_for_subkegiatan(
        &self,
        id_subkegiatan: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_perencanaan_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM perencanaan WHERE id_subkegiatan = $1)",
        )
        .bind(id_subkegiatan)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a header plus optional initial members in one transaction.
    /// Any member insert failure rolls the header back too.
    pub async fn create_with_anggota(
        &self,
        id_subkegiatan: &str,
        id_pengawas: Uuid,
        anggota: &[AnggotaInput],
    ) -> Result<PerencanaanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_perencanaan");
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query_as::<_, PerencanaanEntity>(
            r#"
            INSERT INTO perencanaan (id_subkegiatan, id_pengawas)
            VALUES ($1, $2)
            RETURNING id, id_subkegiatan, id_pengawas, created_at, updated_at
            "#,
        )
        .bind(id_subkegiatan)
        .bind(id_pengawas)
        .fetch_one(&mut *tx)
        .await?;

        for a in anggota {
            sqlx::query(
                r#"
                INSERT INTO kelompok_perencanaan (id_perencanaan, id_mitra, kode_jabatan, volume_tugas)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(header.id)
            .bind(a.id_mitra)
            .bind(&a.kode_jabatan)
            .bind(a.volume_tugas)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(header)
    }

    /// List headers joined with display fields and member counts,
    /// optionally restricted to one start-date year.
    pub async fn list_detail(
        &self,
        tahun: Option<i32>,
    ) -> Result<Vec<PerencanaanDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_perencanaan_detail");
        let result = sqlx::query_as::<_, PerencanaanDetailEntity>(
            r#"
            SELECT p.id, p.id_subkegiatan, p.id_pengawas, p.created_at, p.updated_at,
                   s.nama_subkegiatan, k.nama_kegiatan, u.username AS nama_pengawas,
                   (SELECT COUNT(*) FROM kelompok_perencanaan kp
                     WHERE kp.id_perencanaan = p.id) AS jumlah_anggota
            FROM perencanaan p
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN kegiatan k ON k.id = s.id_kegiatan
            JOIN users u ON u.id = p.id_pengawas
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1)
            ORDER BY s.tanggal_mulai DESC
            "#,
        )
        .bind(tahun)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a header by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PerencanaanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_perencanaan_by_id");
        let result = sqlx::query_as::<_, PerencanaanEntity>(
            r#"
            SELECT id, id_subkegiatan, id_pengawas, created_at, updated_at
            FROM perencanaan
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a header joined with display fields.
    pub async fn find_detail(&self, id: i64) -> Result<Option<PerencanaanDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_perencanaan_detail");
        let result = sqlx::query_as::<_, PerencanaanDetailEntity>(
            r#"
            SELECT p.id, p.id_subkegiatan, p.id_pengawas, p.created_at, p.updated_at,
                   s.nama_subkegiatan, k.nama_kegiatan, u.username AS nama_pengawas,
                   (SELECT COUNT(*) FROM kelompok_perencanaan kp
                     WHERE kp.id_perencanaan = p.id) AS jumlah_anggota
            FROM perencanaan p
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN kegiatan k ON k.id = s.id_kegiatan
            JOIN users u ON u.id = p.id_pengawas
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Change the supervising user.
    pub async fn update_pengawas(
        &self,
        id: i64,
        id_pengawas: Option<Uuid>,
    ) -> Result<Option<PerencanaanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_perencanaan");
        let result = sqlx::query_as::<_, PerencanaanEntity>(
            r#"
            UPDATE perencanaan
            SET id_pengawas = COALESCE($2, id_pengawas), updated_at = NOW()
            WHERE id = $1
            RETURNING id, id_subkegiatan, id_pengawas, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(id_pengawas)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a header. Line items cascade.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_perencanaan");
        let result = sqlx::query("DELETE FROM perencanaan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Member rows joined with partner, position, and the current honor
    /// rate; the per-member total is computed in SQL at read time.
    pub async fn list_anggota(&self, id: i64) -> Result<Vec<AnggotaDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_anggota_perencanaan");
        let result = sqlx::query_as::<_, AnggotaDetailEntity>(
            r#"
            SELECT kp.id, kp.id_mitra, m.nama_lengkap, m.nik, m.sobat_id,
                   kp.kode_jabatan, j.nama_jabatan, kp.volume_tugas,
                   h.tarif, (h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_perencanaan kp
            JOIN perencanaan p ON p.id = kp.id_perencanaan
            JOIN mitra m ON m.id = kp.id_mitra
            JOIN jabatan_mitra j ON j.kode_jabatan = kp.kode_jabatan
            LEFT JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                                  AND h.kode_jabatan = kp.kode_jabatan
            WHERE kp.id_perencanaan = $1
            ORDER BY m.nama_lengkap ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether the partner is already on the roster.
    pub async fn anggota_exists(
        &self,
        id_perencanaan: i64,
        id_mitra: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_anggota_perencanaan_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM kelompok_perencanaan
                WHERE id_perencanaan = $1 AND id_mitra = $2
            )
            "#,
        )
        .bind(id_perencanaan)
        .bind(id_mitra)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Add one member. The unique (header, partner) index backs the
    /// caller's advisory duplicate check.
    pub async fn add_anggota(
        &self,
        id_perencanaan: i64,
        id_mitra: i64,
        kode_jabatan: &str,
        volume_tugas: i32,
    ) -> Result<KelompokPerencanaanEntity, sqlx::Error> {
        let timer = QueryTimer::new("add_anggota_perencanaan");
        let result = sqlx::query_as::<_, KelompokPerencanaanEntity>(
            r#"
            INSERT INTO kelompok_perencanaan (id_perencanaan, id_mitra, kode_jabatan, volume_tugas)
            VALUES ($1, $2, $3, $4)
            RETURNING id, id_perencanaan, id_mitra, kode_jabatan, volume_tugas
            "#,
        )
        .bind(id_perencanaan)
        .bind(id_mitra)
        .bind(kode_jabatan)
        .bind(volume_tugas)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update one member's position/volume. NULL arguments leave the
    /// column untouched.
    pub async fn update_anggota(
        &self,
        id_perencanaan: i64,
        anggota_id: i64,
        kode_jabatan: Option<&str>,
        volume_tugas: Option<i32>,
    ) -> Result<Option<KelompokPerencanaanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_anggota_perencanaan");
        let result = sqlx::query_as::<_, KelompokPerencanaanEntity>(
            r#"
            UPDATE kelompok_perencanaan
            SET
                kode_jabatan = COALESCE($3, kode_jabatan),
                volume_tugas = COALESCE($4, volume_tugas)
            WHERE id = $2 AND id_perencanaan = $1
            RETURNING id, id_perencanaan, id_mitra, kode_jabatan, volume_tugas
            "#,
        )
        .bind(id_perencanaan)
        .bind(anggota_id)
        .bind(kode_jabatan)
        .bind(volume_tugas)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove one member.
    pub async fn remove_anggota(
        &self,
        id_perencanaan: i64,
        anggota_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_anggota_perencanaan");
        let result =
            sqlx::query("DELETE FROM kelompok_perencanaan WHERE id = $1 AND id_perencanaan = $2")
                .bind(anggota_id)
                .bind(id_perencanaan)
                .execute(&self.pool)
                .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Raw member rows of one roster, used by the promotion flow.
    pub async fn anggota_raw(
        &self,
        id_perencanaan: i64,
    ) -> Result<Vec<KelompokPerencanaanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("anggota_perencanaan_raw");
        let result = sqlx::query_as::<_, KelompokPerencanaanEntity>(
            r#"
            SELECT id, id_perencanaan, id_mitra, kode_jabatan, volume_tugas
            FROM kelompok_perencanaan
            WHERE id_perencanaan = $1
            ORDER BY id
            "#,
        )
        .bind(id_perencanaan)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: PerencanaanRepository tests require a database connection and
    // are covered by integration tests.
}
