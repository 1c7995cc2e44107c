//! Honor-cap rule entity (database row mapping).

use rust_decimal::Decimal;
use sqlx::FromRow;

use domain::models::AturanPeriode;

/// Database row mapping for the aturan_periode table.
#[derive(Debug, Clone, FromRow)]
pub struct AturanPeriodeEntity {
    pub id: i64,
    pub periode: String,
    pub batas_honor: Decimal,
}

impl From<AturanPeriodeEntity> for AturanPeriode {
    fn from(entity: AturanPeriodeEntity) -> Self {
        Self {
            id: entity.id,
            periode: entity.periode,
            batas_honor: entity.batas_honor,
        }
    }
}
