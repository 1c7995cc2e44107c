use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error envelope: `{status: "error", message, errors?}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validasi gagal".to_string(),
                Some(field_messages(&errors)),
            ),
            ApiError::Internal(msg) => {
                // Log the real cause; clients only see a generic message.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Terjadi kesalahan pada server".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            status: "error",
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Flattens validator output into `{field: [messages]}`.
fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Field {} tidak valid", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Data tidak ditemukan".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // unique_violation
                        "23505" => ApiError::Conflict("Data sudah ada".into()),
                        // foreign_key_violation: either a delete blocked by
                        // referencing rows or an insert naming a missing row
                        "23503" => {
                            ApiError::Conflict("Data masih direferensikan oleh data lain".into())
                        }
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<shared::password::PasswordError> for ApiError {
    fn from(err: shared::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password error: {}", err))
    }
}

/// Success envelope: `{status: "success", message?, data?}`.
pub fn success<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// Success envelope with a human-readable message.
pub fn success_message<T: Serialize>(message: &str, data: T) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": message,
        "data": data,
    }))
}

/// Success envelope carrying only a message.
pub fn message_only(message: &str) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "Username harus 3-50 karakter"))]
        username: String,
    }

    #[test]
    fn test_api_error_not_found() {
        let response = ApiError::NotFound("Mitra tidak ditemukan".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_conflict() {
        let response = ApiError::Conflict("NIK sudah terdaftar".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_api_error_bad_request() {
        let response = ApiError::BadRequest("Format periode salah".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_unauthorized() {
        let response = ApiError::Unauthorized("Token tidak valid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_error_validation_is_422() {
        let probe = Probe {
            username: "ab".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_field_messages_shape() {
        let probe = Probe {
            username: "ab".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let map = field_messages(&errors);
        assert_eq!(
            map.get("username"),
            Some(&vec!["Username harus 3-50 karakter".to_string()])
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_internal_hides_detail() {
        let response = ApiError::Internal("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
