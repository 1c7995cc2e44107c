//! Yearly honor-cap rule (aturan periode) CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{AturanPeriode, CreateAturanPeriodeRequest, UpdateAturanPeriodeRequest};
use persistence::repositories::AturanPeriodeRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List all cap rules.
///
/// GET /api/aturan-periode
pub async fn list_aturan(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AturanPeriodeRepository::new(state.pool.clone());
    let data: Vec<AturanPeriode> = repo
        .list()
        .await?
        .into_iter()
        .map(AturanPeriode::from)
        .collect();
    Ok(error::success(data))
}

/// Create the cap rule for a year. One rule per year; the value is the
/// monthly ceiling.
///
/// POST /api/aturan-periode
pub async fn create_aturan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateAturanPeriodeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;
    request.check_batas().map_err(ApiError::BadRequest)?;

    let repo = AturanPeriodeRepository::new(state.pool.clone());
    if repo.find_by_periode(&request.periode).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Aturan untuk periode {} sudah ada",
            request.periode
        )));
    }

    let entity = repo.create(&request.periode, request.batas_honor).await?;

    info!(periode = %entity.periode, "Aturan periode dibuat");

    Ok((StatusCode::CREATED, error::success(AturanPeriode::from(entity))))
}

/// Get one cap rule.
///
/// GET /api/aturan-periode/:id
pub async fn get_aturan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AturanPeriodeRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Aturan periode tidak ditemukan".to_string()))?;

    Ok(error::success(AturanPeriode::from(entity)))
}

/// Update a rule's cap value.
///
/// PUT /api/aturan-periode/:id
pub async fn update_aturan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAturanPeriodeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(batas) = request.batas_honor {
        if batas <= rust_decimal::Decimal::ZERO {
            return Err(ApiError::BadRequest(
                "Batas honor harus lebih dari nol".to_string(),
            ));
        }
    }

    let repo = AturanPeriodeRepository::new(state.pool.clone());
    let entity = repo
        .update(id, request.batas_honor)
        .await?
        .ok_or_else(|| ApiError::NotFound("Aturan periode tidak ditemukan".to_string()))?;

    info!(aturan_id = id, "Aturan periode diperbarui");

    Ok(error::success(AturanPeriode::from(entity)))
}

/// Delete a cap rule.
///
/// DELETE /api/aturan-periode/:id
pub async fn delete_aturan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AturanPeriodeRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Aturan periode tidak ditemukan".to_string()));
    }

    info!(aturan_id = id, "Aturan periode dihapus");

    Ok(error::message_only("Aturan periode berhasil dihapus"))
}
