//! Mitra repository for partner and year-activation database operations.

use domain::models::{ImportReport, MitraImportRow};
use sqlx::PgPool;

use crate::entities::{MitraEntity, TahunAktifEntity};
use crate::metrics::QueryTimer;

/// Outcome of the dual-semantics partner deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MitraDeleteOutcome {
    /// Only the targeted year's activation was removed.
    TahunDihapus(String),
    /// The partner row itself (and its activations) was removed.
    MitraDihapus,
    /// No such partner.
    TidakDitemukan,
}

/// Repository for partner-related database operations.
#[derive(Clone)]
pub struct MitraRepository {
    pool: PgPool,
}

impl MitraRepository {
    /// Creates a new MitraRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Free-text search across name, NIK, and sobat id. A NULL search term
    /// lists everything.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_mitra");
        let pattern = term.map(|t| format!("%{}%", t));
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            SELECT id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                   jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            FROM mitra
            WHERE $1::text IS NULL
               OR nama_lengkap ILIKE $1
               OR nik ILIKE $1
               OR sobat_id ILIKE $1
            ORDER BY nama_lengkap ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a partner by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mitra_by_id");
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            SELECT id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                   jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            FROM mitra
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a partner by NIK.
    pub async fn find_by_nik(&self, nik: &str) -> Result<Option<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mitra_by_nik");
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            SELECT id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                   jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            FROM mitra
            WHERE nik = $1
            "#,
        )
        .bind(nik)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a partner by external sobat id.
    pub async fn find_by_sobat_id(
        &self,
        sobat_id: &str,
    ) -> Result<Option<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mitra_by_sobat_id");
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            SELECT id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                   jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            FROM mitra
            WHERE sobat_id = $1
            "#,
        )
        .bind(sobat_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert a partner by NIK and activate it for the given year, in one
    /// transaction. An existing row is overwritten with the latest payload.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_by_nik(
        &self,
        nama_lengkap: &str,
        nik: &str,
        sobat_id: Option<&str>,
        alamat: Option<&str>,
        nomor_hp: Option<&str>,
        email: Option<&str>,
        jenis_kelamin: Option<&str>,
        pendidikan: Option<&str>,
        pekerjaan: Option<&str>,
        tahun: &str,
    ) -> Result<MitraEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_mitra_by_nik");
        let mut tx = self.pool.begin().await?;

        let mitra = sqlx::query_as::<_, MitraEntity>(
            r#"
            INSERT INTO mitra (nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                               jenis_kelamin, pendidikan, pekerjaan)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (nik) DO UPDATE SET
                nama_lengkap = EXCLUDED.nama_lengkap,
                sobat_id = EXCLUDED.sobat_id,
                alamat = EXCLUDED.alamat,
                nomor_hp = EXCLUDED.nomor_hp,
                email = EXCLUDED.email,
                jenis_kelamin = EXCLUDED.jenis_kelamin,
                pendidikan = EXCLUDED.pendidikan,
                pekerjaan = EXCLUDED.pekerjaan,
                updated_at = NOW()
            RETURNING id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                      jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            "#,
        )
        .bind(nama_lengkap)
        .bind(nik)
        .bind(sobat_id)
        .bind(alamat)
        .bind(nomor_hp)
        .bind(email)
        .bind(jenis_kelamin)
        .bind(pendidikan)
        .bind(pekerjaan)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO tahun_aktif (mitra_id, tahun, status)
            VALUES ($1, $2, 'aktif')
            ON CONFLICT (mitra_id, tahun) DO UPDATE SET status = 'aktif'
            "#,
        )
        .bind(mitra.id)
        .bind(tahun)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(mitra)
    }

    /// Update a partner. NULL arguments leave the column untouched.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_mitra(
        &self,
        id: i64,
        nama_lengkap: Option<&str>,
        nik: Option<&str>,
        sobat_id: Option<&str>,
        alamat: Option<&str>,
        nomor_hp: Option<&str>,
        email: Option<&str>,
        jenis_kelamin: Option<&str>,
        pendidikan: Option<&str>,
        pekerjaan: Option<&str>,
    ) -> Result<Option<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_mitra");
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            UPDATE mitra
            SET
                nama_lengkap = COALESCE($2, nama_lengkap),
                nik = COALESCE($3, nik),
                sobat_id = COALESCE($4, sobat_id),
                alamat = COALESCE($5, alamat),
                nomor_hp = COALESCE($6, nomor_hp),
                email = COALESCE($7, email),
                jenis_kelamin = COALESCE($8, jenis_kelamin),
                pendidikan = COALESCE($9, pendidikan),
                pekerjaan = COALESCE($10, pekerjaan),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                      jenis_kelamin, pendidikan, pekerjaan, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(nama_lengkap)
        .bind(nik)
        .bind(sobat_id)
        .bind(alamat)
        .bind(nomor_hp)
        .bind(email)
        .bind(jenis_kelamin)
        .bind(pendidikan)
        .bind(pekerjaan)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a partner, or just one year's activation.
    ///
    /// When a year is targeted and the partner has activations in more than
    /// one year, only that activation row is removed; otherwise the partner
    /// itself goes. Decided and executed inside one transaction so a
    /// concurrent activation change cannot leave partial state.
    pub async fn delete_mitra(
        &self,
        id: i64,
        tahun: Option<&str>,
    ) -> Result<MitraDeleteOutcome, sqlx::Error> {
        let timer = QueryTimer::new("delete_mitra");
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM mitra WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            timer.record();
            return Ok(MitraDeleteOutcome::TidakDitemukan);
        }

        let jumlah_tahun = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tahun_aktif WHERE mitra_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = match tahun {
            Some(tahun) if jumlah_tahun > 1 => {
                sqlx::query("DELETE FROM tahun_aktif WHERE mitra_id = $1 AND tahun = $2")
                    .bind(id)
                    .bind(tahun)
                    .execute(&mut *tx)
                    .await?;
                MitraDeleteOutcome::TahunDihapus(tahun.to_string())
            }
            _ => {
                sqlx::query("DELETE FROM mitra WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                MitraDeleteOutcome::MitraDihapus
            }
        };

        tx.commit().await?;
        timer.record();
        Ok(outcome)
    }

    /// Activation years for one partner.
    pub async fn tahun_aktif_for(&self, mitra_id: i64) -> Result<Vec<TahunAktifEntity>, sqlx::Error> {
        let timer = QueryTimer::new("tahun_aktif_for_mitra");
        let result = sqlx::query_as::<_, TahunAktifEntity>(
            r#"
            SELECT id, mitra_id, tahun, status
            FROM tahun_aktif
            WHERE mitra_id = $1
            ORDER BY tahun DESC
            "#,
        )
        .bind(mitra_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a partner's activation status for one year (insert-or-update).
    pub async fn set_status_tahun(
        &self,
        mitra_id: i64,
        tahun: &str,
        status: &str,
    ) -> Result<TahunAktifEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_mitra_status_tahun");
        let result = sqlx::query_as::<_, TahunAktifEntity>(
            r#"
            INSERT INTO tahun_aktif (mitra_id, tahun, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (mitra_id, tahun) DO UPDATE SET status = EXCLUDED.status
            RETURNING id, mitra_id, tahun, status
            "#,
        )
        .bind(mitra_id)
        .bind(tahun)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether the partner has an `aktif` activation for the year.
    pub async fn is_aktif(&self, mitra_id: i64, tahun: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_mitra_aktif");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tahun_aktif
                WHERE mitra_id = $1 AND tahun = $2 AND status = 'aktif'
            )
            "#,
        )
        .bind(mitra_id)
        .bind(tahun)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Page of partners active in the given year, optionally filtered by a
    /// free-text term.
    pub async fn list_aktif_paginated(
        &self,
        tahun: &str,
        term: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MitraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mitra_aktif_paginated");
        let pattern = term.map(|t| format!("%{}%", t));
        let result = sqlx::query_as::<_, MitraEntity>(
            r#"
            SELECT m.id, m.nama_lengkap, m.nik, m.sobat_id, m.alamat, m.nomor_hp, m.email,
                   m.jenis_kelamin, m.pendidikan, m.pekerjaan, m.created_at, m.updated_at
            FROM mitra m
            JOIN tahun_aktif ta ON ta.mitra_id = m.id
            WHERE ta.tahun = $1 AND ta.status = 'aktif'
              AND ($2::text IS NULL
                   OR m.nama_lengkap ILIKE $2
                   OR m.nik ILIKE $2
                   OR m.sobat_id ILIKE $2)
            ORDER BY m.nama_lengkap ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(tahun)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count of partners matching the paginated listing's filters.
    pub async fn count_aktif(
        &self,
        tahun: &str,
        term: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_mitra_aktif");
        let pattern = term.map(|t| format!("%{}%", t));
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM mitra m
            JOIN tahun_aktif ta ON ta.mitra_id = m.id
            WHERE ta.tahun = $1 AND ta.status = 'aktif'
              AND ($2::text IS NULL
                   OR m.nama_lengkap ILIKE $2
                   OR m.nik ILIKE $2
                   OR m.sobat_id ILIKE $2)
            "#,
        )
        .bind(tahun)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total active headcount for the year, ignoring the search filter.
    pub async fn total_aktif(&self, tahun: &str) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("total_mitra_aktif");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tahun_aktif
            WHERE tahun = $1 AND status = 'aktif'
            "#,
        )
        .bind(tahun)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Import a batch of partner rows inside one transaction.
    ///
    /// Each row upserts by NIK and activates the partner for `tahun`. Blank
    /// NIKs and in-batch duplicates are recorded in the report and skipped;
    /// a database error escaping this method rolls the whole batch back.
    pub async fn import_batch(
        &self,
        rows: &[MitraImportRow],
        tahun: &str,
    ) -> Result<ImportReport, sqlx::Error> {
        let timer = QueryTimer::new("import_mitra_batch");
        let mut report = ImportReport::default();
        // (nik, spreadsheet row) of rows already upserted, for duplicate
        // messages that point back at the first occurrence
        let mut seen_nik: Vec<(String, usize)> = Vec::new();

        let mut tx = self.pool.begin().await?;

        for row in rows {
            let nama = match &row.nama_lengkap {
                Some(n) => n.clone(),
                None => {
                    report.record_dilewati();
                    continue;
                }
            };
            let nik = match &row.nik {
                Some(n) => n.clone(),
                None => {
                    report.record_gagal(row.baris, "NIK kosong");
                    continue;
                }
            };
            if let Some((_, baris_awal)) = seen_nik.iter().find(|(s, _)| s == &nik) {
                report.record_gagal(
                    row.baris,
                    format!("NIK {} duplikat dengan baris {}", nik, baris_awal),
                );
                continue;
            }

            let mitra_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO mitra (nama_lengkap, nik, sobat_id, alamat, nomor_hp, email,
                                   jenis_kelamin, pendidikan, pekerjaan)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (nik) DO UPDATE SET
                    nama_lengkap = EXCLUDED.nama_lengkap,
                    sobat_id = COALESCE(EXCLUDED.sobat_id, mitra.sobat_id),
                    alamat = COALESCE(EXCLUDED.alamat, mitra.alamat),
                    nomor_hp = COALESCE(EXCLUDED.nomor_hp, mitra.nomor_hp),
                    email = COALESCE(EXCLUDED.email, mitra.email),
                    jenis_kelamin = COALESCE(EXCLUDED.jenis_kelamin, mitra.jenis_kelamin),
                    pendidikan = COALESCE(EXCLUDED.pendidikan, mitra.pendidikan),
                    pekerjaan = COALESCE(EXCLUDED.pekerjaan, mitra.pekerjaan),
                    updated_at = NOW()
                RETURNING id
                "#,
            )
            .bind(&nama)
            .bind(&nik)
            .bind(&row.sobat_id)
            .bind(&row.alamat)
            .bind(&row.nomor_hp)
            .bind(&row.email)
            .bind(&row.jenis_kelamin)
            .bind(&row.pendidikan)
            .bind(&row.pekerjaan)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO tahun_aktif (mitra_id, tahun, status)
                VALUES ($1, $2, 'aktif')
                ON CONFLICT (mitra_id, tahun) DO UPDATE SET status = 'aktif'
                "#,
            )
            .bind(mitra_id)
            .bind(tahun)
            .execute(&mut *tx)
            .await?;

            seen_nik.push((nik, row.baris));
            report.record_berhasil();
        }

        tx.commit().await?;
        timer.record();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    // Note: MitraRepository tests require a database connection and are
    // covered by integration tests.
}
