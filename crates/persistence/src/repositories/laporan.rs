//! Laporan repository: honor aggregation over rosters.
//!
//! Execution-side totals only count rosters in the `disetujui` state; the
//! planning-side recaps aggregate over planning rosters regardless of any
//! approval. Nothing here is cached; every call recomputes from source
//! tables.

use sqlx::PgPool;

use crate::entities::{RekapBulanEntity, RekapDetailEntity, TotalHonorMitraEntity};
use crate::metrics::QueryTimer;

/// Repository for reporting queries.
#[derive(Clone)]
pub struct LaporanRepository {
    pool: PgPool,
}

impl LaporanRepository {
    /// Creates a new LaporanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Per-partner honor totals over approved execution rosters within the
    /// requested window. The month/activity/sub-activity filters are
    /// NULL-tolerant.
    pub async fn total_honor_penugasan(
        &self,
        tahun: i32,
        bulan: Option<i32>,
        id_kegiatan: Option<i64>,
        id_subkegiatan: Option<&str>,
    ) -> Result<Vec<TotalHonorMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("total_honor_penugasan");
        let result = sqlx::query_as::<_, TotalHonorMitraEntity>(
            r#"
            SELECT m.id AS id_mitra, m.nama_lengkap, m.nik,
                   SUM(h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_penugasan kp
            JOIN penugasan p ON p.id = kp.id_penugasan
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN kegiatan k ON k.id = s.id_kegiatan
            JOIN mitra m ON m.id = kp.id_mitra
            JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                             AND h.kode_jabatan = kp.kode_jabatan
            WHERE p.status_penugasan = 'disetujui'
              AND EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1
              AND ($2::int IS NULL OR EXTRACT(MONTH FROM s.tanggal_mulai)::int = $2)
              AND ($3::bigint IS NULL OR k.id = $3)
              AND ($4::text IS NULL OR s.id = $4)
            GROUP BY m.id, m.nama_lengkap, m.nik
            ORDER BY total_honor DESC
            "#,
        )
        .bind(tahun)
        .bind(bulan)
        .bind(id_kegiatan)
        .bind(id_subkegiatan)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Planning-side totals bucketed by the calendar month of each
    /// sub-activity's start date.
    pub async fn rekap_bulanan(&self, tahun: i32) -> Result<Vec<RekapBulanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("rekap_bulanan");
        let result = sqlx::query_as::<_, RekapBulanEntity>(
            r#"
            SELECT EXTRACT(MONTH FROM s.tanggal_mulai)::int AS bulan,
                   COUNT(DISTINCT kp.id_mitra) AS jumlah_mitra,
                   SUM(h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_perencanaan kp
            JOIN perencanaan p ON p.id = kp.id_perencanaan
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                             AND h.kode_jabatan = kp.kode_jabatan
            WHERE EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1
            GROUP BY EXTRACT(MONTH FROM s.tanggal_mulai)
            ORDER BY bulan ASC
            "#,
        )
        .bind(tahun)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-partner planning totals within one month.
    pub async fn rekap_mitra(
        &self,
        tahun: i32,
        bulan: i32,
    ) -> Result<Vec<TotalHonorMitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("rekap_mitra");
        let result = sqlx::query_as::<_, TotalHonorMitraEntity>(
            r#"
            SELECT m.id AS id_mitra, m.nama_lengkap, m.nik,
                   SUM(h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_perencanaan kp
            JOIN perencanaan p ON p.id = kp.id_perencanaan
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN mitra m ON m.id = kp.id_mitra
            JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                             AND h.kode_jabatan = kp.kode_jabatan
            WHERE EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1
              AND EXTRACT(MONTH FROM s.tanggal_mulai)::int = $2
            GROUP BY m.id, m.nama_lengkap, m.nik
            ORDER BY total_honor DESC
            "#,
        )
        .bind(tahun)
        .bind(bulan)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Every planning line contributing to one partner's monthly total.
    pub async fn rekap_detail(
        &self,
        tahun: i32,
        bulan: i32,
        id_mitra: i64,
    ) -> Result<Vec<RekapDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("rekap_detail");
        let result = sqlx::query_as::<_, RekapDetailEntity>(
            r#"
            SELECT s.id AS id_subkegiatan, s.nama_subkegiatan, k.nama_kegiatan,
                   kp.kode_jabatan, j.nama_jabatan, kp.volume_tugas,
                   h.tarif, (h.tarif * kp.volume_tugas) AS total_honor
            FROM kelompok_perencanaan kp
            JOIN perencanaan p ON p.id = kp.id_perencanaan
            JOIN subkegiatan s ON s.id = p.id_subkegiatan
            JOIN kegiatan k ON k.id = s.id_kegiatan
            JOIN jabatan_mitra j ON j.kode_jabatan = kp.kode_jabatan
            JOIN honorarium h ON h.id_subkegiatan = p.id_subkegiatan
                             AND h.kode_jabatan = kp.kode_jabatan
            WHERE EXTRACT(YEAR FROM s.tanggal_mulai)::int = $1
              AND EXTRACT(MONTH FROM s.tanggal_mulai)::int = $2
              AND kp.id_mitra = $3
            ORDER BY s.tanggal_mulai ASC, s.id
            "#,
        )
        .bind(tahun)
        .bind(bulan)
        .bind(id_mitra)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: LaporanRepository tests require a database connection and are
    // covered by integration tests.
}
