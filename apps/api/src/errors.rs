use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Startup-time configuration failures. The service refuses to start on any
/// of these; nothing is validated per call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Daily ceiling must not be negative (got {0})")]
    NegativeCeiling(i64),

    #[error(
        "Tier thresholds must satisfy excellent > good > partial \
         (got excellent={excellent}, good={good}, partial={partial})"
    )]
    TierOrder {
        excellent: i32,
        good: i32,
        partial: i32,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Daily limit reached ({used}/{ceiling})")]
    RateLimited { used: u32, ceiling: u32 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited { used, ceiling } => {
                tracing::warn!("Rejected scan: daily limit reached ({used}/{ceiling})");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    format!(
                        "You have used {used} of {ceiling} daily scans. The limit resets at midnight."
                    ),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
