//! Penugasan repository for execution-roster database operations,
//! including the planning→execution promotion.

use domain::models::{AnggotaPenugasanInput, ImportPerencanaanResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    AnggotaDetailEntity, KelompokPenugasanEntity, PenugasanDetailEntity, PenugasanEntity,
};
use crate::metrics::QueryTimer;

/// Repository for execution-roster database operations.
#[derive(Clone)]
pub struct PenugasanRepository {
    pool: PgPool,
}

impl PenugasanRepository {
    /// Creates a new PenugasanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether an execution roster already exists for the sub-activity.
    pub async fn exists_for_subkegiatan(
        &self,
        id_subkegiatan: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_penugasan_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM penugasan WHERE id_subkegiatan = $1)",
        )
        .bind(id_subkegiatan)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a header plus optional initial members in one transaction.
    pub async fn create_with_anggota(
        &self,
        id_subkegiatan: &str,
        id_pengawas: Uuid,
        anggota: &[AnggotaPenugasanInput],
    ) -> Result<PenugasanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_penugasan");
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query_as::<_, PenugasanEntity>(
            r#"
            INSERT INTO penugasan (id_subkegiatan, id_pengawas)
            VALUES ($1, $2)
            RETURNING id, id_subkegiatan, id_pengawas, status_penugasan, created_at, updated_at
            "#,
        )
        .bind(id_subkegiatan)
        .bind(id_pengawas)
        .fetch_one(&mut *tx)
        .await?;

        for a in anggota {
            sqlx::query(
                r#"
                INSERT INTO kelompok_penugasan (id_penugasan, id_mitra, kode_jabatan, volume_tugas)
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
    /// optionally restricted to one start-date year and/or status.
    pub async fn list_detail(
        &self,
        tahun: Option<i32>,
        status: Option<&str>,
    ) -> Result<Vec<PenugasanDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_penugasan_detail");
        let result = sqlx::query_as::<_, PenugasanDetailEntity>(
            r#"
            SELECT p.id, p.id_subkegiatan, p.id_pengawas, p.status_penugasan,
                   p.created_at, p.updated_at,
                   s.nama_subkegiatan, k.nama_kegiatan, u.username AS nama_pengawas,
                   (SELECT COUNT(*) FROM kelompok_penugasan kp
                     WHERE kp.id_penugasan = p.id) AS jumlah_anggota
            FROM penugasan p
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN kegiatan k ON k.id = s.id_kegiatan
            JOIN users u ON u.id = p.id_pengawas
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1)
              AND ($2::text IS NULL OR p.status_penugasan = $2)
            ORDER BY s.tanggal_mulai DESC
            "#,
        )
        .bind(tahun)
        .bind(status)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a header by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PenugasanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_penugasan_by_id");
        let result = sqlx::query_as::<_, PenugasanEntity>(
            r#"
            SELECT id, id_subkegiatan, id_pengawas, status_penugasan, created_at, updated_at
            FROM penugasan
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
    pub async fn find_detail(&self, id: i64) -> Result<Option<PenugasanDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_penugasan_detail");
        let result = sqlx::query_as::<_, PenugasanDetailEntity>(
            r#"
            SELECT p.id, p.id_subkegiatan, p.id_pengawas, p.status_penugasan,
                   p.created_at, p.updated_at,
                   s.nama_subkegiatan, k.nama_kegiatan, u.username AS nama_pengawas,
                   (SELECT COUNT(*) FROM kelompok_penugasan kp
                     WHERE kp.id_penugasan = p.id) AS jumlah_anggota
            FROM penugasan p
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
    ) -> Result<Option<PenugasanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_penugasan");
        let result = sqlx::query_as::<_, PenugasanEntity>(
            r#"
            UPDATE penugasan
            SET id_pengawas = COALESCE($2, id_pengawas), updated_at = NOW()
            WHERE id = $1
            RETURNING id, id_subkegiatan, id_pengawas, status_penugasan, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(id_pengawas)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Move a roster into the approved state.
    pub async fn set_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<Option<PenugasanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_penugasan_status");
        let result = sqlx::query_as::<_, PenugasanEntity>(
            r#"
            UPDATE penugasan
            SET status_penugasan = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, id_subkegiatan, id_pengawas, status_penugasan, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a header. Line items cascade.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_penugasan");
        let result = sqlx::query("DELETE FROM penugasan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Member rows joined with partner, position, and the current honor
    /// rate; the per-member total is computed in SQL at read time.
    pub async fn list_anggota(&self, id: i64) -> Result<Vec<AnggotaDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_anggota_penugasan");
        let result = sqlx::query_as::<_, AnggotaDetailEntity>(
            r#"
            SELECT kp.id, kp.id_mitra, m.nama_lengkap, m.nik, m.sobat_id,
                   kp.kode_jabatan, j.nama_jabatan, kp.volume_tugas,
                   h.tarif, (h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_penugasan kp
            JOIN penugasan p ON p.id = kp.id_penugasan
            JOIN mitra m ON m.id = kp.id_mitra
            JOIN jabatan_mitra j ON j.kode_jabatan = kp.kode_jabatan
            LEFT JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                                  AND h.kode_jabatan = kp.kode_jabatan
            WHERE kp.id_penugasan = $1
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
        id_penugasan: i64,
        id_mitra: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_anggota_penugasan_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM kelompok_penugasan
                WHERE id_penugasan = $1 AND id_mitra = $2
            )
            "#,
        )
        .bind(id_penugasan)
        .bind(id_mitra)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Add one member.
    pub async fn add_anggota(
        &self,
        id_penugasan: i64,
        id_mitra: i64,
        kode_jabatan: &str,
        volume_tugas: i32,
    ) -> Result<KelompokPenugasanEntity, sqlx::Error> {
        let timer = QueryTimer::new("add_anggota_penugasan");
        let result = sqlx::query_as::<_, KelompokPenugasanEntity>(
            r#"
            INSERT INTO kelompok_penugasan (id_penugasan, id_mitra, kode_jabatan, volume_tugas)
            VALUES ($1, $2, $3, $4)
            RETURNING id, id_penugasan, id_mitra, kode_jabatan, volume_tugas, created_at
            "#,
        )
        .bind(id_penugasan)
        .bind(id_mitra)
        .bind(kode_jabatan)
        .bind(volume_tugas)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update one member's position/volume.
    pub async fn update_anggota(
        &self,
        id_penugasan: i64,
        anggota_id: i64,
        kode_jabatan: Option<&str>,
        volume_tugas: Option<i32>,
    ) -> Result<Option<KelompokPenugasanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_anggota_penugasan");
        let result = sqlx::query_as::<_, KelompokPenugasanEntity>(
            r#"
            UPDATE kelompok_penugasan
            SET
                kode_jabatan = COALESCE($3, kode_jabatan),
                volume_tugas = COALESCE($4, volume_tugas)
            WHERE id = $2 AND id_penugasan = $1
            RETURNING id, id_penugasan, id_mitra, kode_jabatan, volume_tugas, created_at
            "#,
        )
        .bind(id_penugasan)
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
        id_penugasan: i64,
        anggota_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_anggota_penugasan");
        let result =
            sqlx::query("DELETE FROM kelompok_penugasan WHERE id = $1 AND id_penugasan = $2")
                .bind(anggota_id)
                .bind(id_penugasan)
                .execute(&self.pool)
                .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Promote planning rosters into execution rosters, idempotently.
    ///
    /// For each planning header: find-or-create the execution header keyed
    /// on `id_subkegiatan`, then find-or-create every member keyed on
    /// (penugasan, mitra), updating position/volume on conflict. Re-running
    /// the promotion updates rather than duplicates. Members removed from
    /// the planning roster since the last run are NOT removed here; the
    /// sync is intentionally one-way.
    ///
    /// Planning rows with volume 0 are floored to 1 to satisfy the
    /// execution-side minimum.
    pub async fn import_from_perencanaan(
        &self,
        perencanaan_ids: &[i64],
    ) -> Result<ImportPerencanaanResponse, sqlx::Error> {
        let timer = QueryTimer::new("import_penugasan_from_perencanaan");
        let mut response = ImportPerencanaanResponse {
            penugasan_dibuat: 0,
            penugasan_diperbarui: 0,
            anggota_ditambahkan: 0,
            anggota_diperbarui: 0,
        };

        let mut tx = self.pool.begin().await?;

        for &perencanaan_id in perencanaan_ids {
            let header = sqlx::query_as::<_, (String, Uuid)>(
                "SELECT id_subkegiatan, id_pengawas FROM perencanaan WHERE id = $1",
            )
            .bind(perencanaan_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some((id_subkegiatan, id_pengawas)) = header else {
                // Silently skip ids that no longer exist; the promotion is
                // best-effort over the selection.
                continue;
            };

            let existing = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM penugasan WHERE id_subkegiatan = $1",
            )
            .bind(&id_subkegiatan)
            .fetch_optional(&mut *tx)
            .await?;

            let penugasan_id = match existing {
                Some(id) => {
                    response.penugasan_diperbarui += 1;
                    id
                }
                None => {
                    let id = sqlx::query_scalar::<_, i64>(
                        r#"
                        INSERT INTO penugasan (id_subkegiatan, id_pengawas)
                        VALUES ($1, $2)
                        RETURNING id
                        "#,
                    )
                    .bind(&id_subkegiatan)
                    .bind(id_pengawas)
                    .fetch_one(&mut *tx)
                    .await?;
                    response.penugasan_dibuat += 1;
                    id
                }
            };

            let anggota = sqlx::query_as::<_, (i64, String, i32)>(
                r#"
                SELECT id_mitra, kode_jabatan, volume_tugas
                FROM kelompok_perencanaan
                WHERE id_perencanaan = $1
                ORDER BY id
                "#,
            )
            .bind(perencanaan_id)
            .fetch_all(&mut *tx)
            .await?;

            for (id_mitra, kode_jabatan, volume_tugas) in anggota {
                let volume = volume_tugas.max(1);

                let sudah_ada = sqlx::query_scalar::<_, bool>(
                    r#"
                    SELECT EXISTS(
                        SELECT 1 FROM kelompok_penugasan
                        WHERE id_penugasan = $1 AND id_mitra = $2
                    )
                    "#,
                )
                .bind(penugasan_id)
                .bind(id_mitra)
                .fetch_one(&mut *tx)
                .await?;

                sqlx::query(
                    r#"
                    INSERT INTO kelompok_penugasan (id_penugasan, id_mitra, kode_jabatan, volume_tugas)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (id_penugasan, id_mitra) DO UPDATE SET
                        kode_jabatan = EXCLUDED.kode_jabatan,
                        volume_tugas = EXCLUDED.volume_tugas
                    "#,
                )
                .bind(penugasan_id)
                .bind(id_mitra)
                .bind(&kode_jabatan)
                .bind(volume)
                .execute(&mut *tx)
                .await?;

                if sudah_ada {
                    response.anggota_diperbarui += 1;
                } else {
                    response.anggota_ditambahkan += 1;
                }
            }
        }

        tx.commit().await?;
        timer.record();
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    // Note: PenugasanRepository tests require a database connection and are
    // covered by integration tests.
}
