use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Structured error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Not Found",
    "message": "Facility 42 not found",
    "timestamp": "2025-01-15T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Facility 42 not found")]
    pub message: String,
    /// ISO 8601 timestamp when the error occurred
    #[schema(example = "2025-01-15T10:30:00.000Z")]
    pub timestamp: String,
}

/// Unified service error taxonomy.
///
/// `PaymentRequired` is deliberately its own variant: clients branch into the
/// payment flow on 402 instead of treating it as a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::DatabaseError(_) | ServiceError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ValidationError(_) | ServiceError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::AuthError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
        }
    }

    /// Message exposed to clients. Database failures are masked; everything
    /// else carries the original text.
    pub fn response_message(&self) -> String {
        match self {
            ServiceError::DatabaseError(err) => {
                tracing::error!(error = %err, "database error");
                "A database error occurred".to_string()
            }
            ServiceError::NotFound(msg)
            | ServiceError::ValidationError(msg)
            | ServiceError::AuthError(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::PaymentRequired(msg)
            | ServiceError::BadRequest(msg)
            | ServiceError::InternalError(msg) => msg.clone(),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(errors.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_required_maps_to_402() {
        let err = ServiceError::PaymentRequired("payment required".into());
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.response_message(), "payment required");
    }

    #[test]
    fn database_errors_are_masked() {
        let err = ServiceError::DatabaseError(sea_orm::error::DbErr::Custom("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response_message(), "A database error occurred");
    }
}
