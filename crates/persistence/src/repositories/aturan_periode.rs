//! Aturan-periode repository for yearly honor-cap database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::entities::AturanPeriodeEntity;
use crate::metrics::QueryTimer;

/// Repository for honor-cap rule database operations.
#[derive(Clone)]
pub struct AturanPeriodeRepository {
    pool: PgPool,
}

impl AturanPeriodeRepository {
    /// Creates a new AturanPeriodeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all rules, newest period first.
    pub async fn list(&self) -> Result<Vec<AturanPeriodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_aturan_periode");
        let result = sqlx::query_as::<_, AturanPeriodeEntity>(
            r#"
            SELECT id, periode, batas_honor
            FROM aturan_periode
            ORDER BY periode DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a rule by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AturanPeriodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_aturan_periode_by_id");
        let result = sqlx::query_as::<_, AturanPeriodeEntity>(
            r#"
            SELECT id, periode, batas_honor
            FROM aturan_periode
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the rule for a year.
    pub async fn find_by_periode(
        &self,
        periode: &str,
    ) -> Result<Option<AturanPeriodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_aturan_periode_by_periode");
        let result = sqlx::query_as::<_, AturanPeriodeEntity>(
            r#"
            SELECT id, periode, batas_honor
            FROM aturan_periode
            WHERE periode = $1
            "#,
        )
        .bind(periode)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a rule. A duplicate year surfaces as a unique violation.
    pub async fn create(
        &self,
        periode: &str,
        batas_honor: Decimal,
    ) -> Result<AturanPeriodeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_aturan_periode");
        let result = sqlx::query_as::<_, AturanPeriodeEntity>(
            r#"
            INSERT INTO aturan_periode (periode, batas_honor)
            VALUES ($1, $2)
            RETURNING id, periode, batas_honor
            "#,
        )
        .bind(periode)
        .bind(batas_honor)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a rule's cap value.
    pub async fn update(
        &self,
        id: i64,
        batas_honor: Option<Decimal>,
    ) -> Result<Option<AturanPeriodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_aturan_periode");
        let result = sqlx::query_as::<_, AturanPeriodeEntity>(
            r#"
            UPDATE aturan_periode
            SET batas_honor = COALESCE($2, batas_honor)
            WHERE id = $1
            RETURNING id, periode, batas_honor
            "#,
        )
        .bind(id)
        .bind(batas_honor)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a rule.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_aturan_periode");
        let result = sqlx::query("DELETE FROM aturan_periode WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: AturanPeriodeRepository tests require a database connection and
    // are covered by integration tests.
}
