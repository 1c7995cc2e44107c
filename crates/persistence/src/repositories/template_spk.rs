//! Template repository for assignment-letter template database operations.

use domain::models::{BagianInput, PasalInput};
use sqlx::PgPool;

use crate::entities::{BagianTeksEntity, MasterTemplateSpkEntity, PasalEntity};
use crate::metrics::QueryTimer;

/// Repository for letter-template database operations.
#[derive(Clone)]
pub struct TemplateSpkRepository {
    pool: PgPool,
}

impl TemplateSpkRepository {
    /// Creates a new TemplateSpkRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List template headers, newest first.
    pub async fn list(&self) -> Result<Vec<MasterTemplateSpkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_template_spk");
        let result = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            SELECT id, nama_template, is_active, created_at, updated_at
            FROM master_template_spk
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a template header by ID.
    pub async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<MasterTemplateSpkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_template_spk_by_id");
        let result = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            SELECT id, nama_template, is_active, created_at, updated_at
            FROM master_template_spk
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The currently active template header, if any.
    pub async fn find_active(&self) -> Result<Option<MasterTemplateSpkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_template_spk");
        let result = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            SELECT id, nama_template, is_active, created_at, updated_at
            FROM master_template_spk
            WHERE is_active = TRUE
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Body sections of one template.
    pub async fn bagian_for(&self, template_id: i64) -> Result<Vec<BagianTeksEntity>, sqlx::Error> {
        let timer = QueryTimer::new("bagian_for_template");
        let result = sqlx::query_as::<_, BagianTeksEntity>(
            r#"
            SELECT id, template_id, jenis_bagian, isi_teks
            FROM template_bagian_teks
            WHERE template_id = $1
            ORDER BY id
            "#,
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Articles of one template, in display order.
    pub async fn pasal_for(&self, template_id: i64) -> Result<Vec<PasalEntity>, sqlx::Error> {
        let timer = QueryTimer::new("pasal_for_template");
        let result = sqlx::query_as::<_, PasalEntity>(
            r#"
            SELECT id, template_id, nomor_pasal, judul_pasal, isi_pasal, urutan
            FROM template_pasal
            WHERE template_id = $1
            ORDER BY urutan ASC
            "#,
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a template with its sections and articles in one transaction.
    pub async fn create_with_parts(
        &self,
        nama_template: &str,
        bagian: &[BagianInput],
        pasal: &[PasalInput],
    ) -> Result<MasterTemplateSpkEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_template_spk");
        let mut tx = self.pool.begin().await?;

        let template = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            INSERT INTO master_template_spk (nama_template)
            VALUES ($1)
            RETURNING id, nama_template, is_active, created_at, updated_at
            "#,
        )
        .bind(nama_template)
        .fetch_one(&mut *tx)
        .await?;

        for b in bagian {
            sqlx::query(
                r#"
                INSERT INTO template_bagian_teks (template_id, jenis_bagian, isi_teks)
                VALUES ($1, $2, $3)
                ON CONFLICT (template_id, jenis_bagian) DO UPDATE SET isi_teks = EXCLUDED.isi_teks
                "#,
            )
            .bind(template.id)
            .bind(b.jenis_bagian.as_str())
            .bind(&b.isi_teks)
            .execute(&mut *tx)
            .await?;
        }

        for (urutan, p) in pasal.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO template_pasal (template_id, nomor_pasal, judul_pasal, isi_pasal, urutan)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(template.id)
            .bind(p.nomor_pasal)
            .bind(&p.judul_pasal)
            .bind(&p.isi_pasal)
            .bind(urutan as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(template)
    }

    /// Update a template in one transaction.
    ///
    /// Sections upsert by (template, kind); when an article list is given
    /// the articles are replaced wholesale with `urutan` taken from array
    /// order. Two concurrent updates are last-write-wins.
    pub async fn update_with_parts(
        &self,
        id: i64,
        nama_template: Option<&str>,
        bagian: Option<&[BagianInput]>,
        pasal: Option<&[PasalInput]>,
    ) -> Result<Option<MasterTemplateSpkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_template_spk");
        let mut tx = self.pool.begin().await?;

        let template = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            UPDATE master_template_spk
            SET nama_template = COALESCE($2, nama_template), updated_at = NOW()
            WHERE id = $1
            RETURNING id, nama_template, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(nama_template)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(template) = template else {
            timer.record();
            return Ok(None);
        };

        if let Some(bagian) = bagian {
            for b in bagian {
                sqlx::query(
                    r#"
                    INSERT INTO template_bagian_teks (template_id, jenis_bagian, isi_teks)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (template_id, jenis_bagian) DO UPDATE SET isi_teks = EXCLUDED.isi_teks
                    "#,
                )
                .bind(template.id)
                .bind(b.jenis_bagian.as_str())
                .bind(&b.isi_teks)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(pasal) = pasal {
            sqlx::query("DELETE FROM template_pasal WHERE template_id = $1")
                .bind(template.id)
                .execute(&mut *tx)
                .await?;

            for (urutan, p) in pasal.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO template_pasal (template_id, nomor_pasal, judul_pasal, isi_pasal, urutan)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(template.id)
                .bind(p.nomor_pasal)
                .bind(&p.judul_pasal)
                .bind(&p.isi_pasal)
                .bind(urutan as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        timer.record();
        Ok(Some(template))
    }

    /// Activate one template: deactivate every template, then flag the
    /// target, atomically. At most one row is active afterwards no matter
    /// how many were active before.
    pub async fn set_active(&self, id: i64) -> Result<Option<MasterTemplateSpkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_template_spk_active");
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE master_template_spk SET is_active = FALSE WHERE is_active = TRUE")
            .execute(&mut *tx)
            .await?;

        let template = sqlx::query_as::<_, MasterTemplateSpkEntity>(
            r#"
            UPDATE master_template_spk
            SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, nama_template, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // An unknown target must not leave every template deactivated.
        match template {
            Some(template) => {
                tx.commit().await?;
                timer.record();
                Ok(Some(template))
            }
            None => {
                tx.rollback().await?;
                timer.record();
                Ok(None)
            }
        }
    }

    /// Delete a template. Sections and articles cascade; letter settings
    /// referencing it fall back to NULL.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_template_spk");
        let result = sqlx::query("DELETE FROM master_template_spk WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: TemplateSpkRepository tests require a database connection and
    // are covered by integration tests.
}
