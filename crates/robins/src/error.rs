use crate::assessment::{AnswerSheetImportError, AssessmentServiceError, ScreeningViolation};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("screening error: {0}")]
    Screening(#[from] ScreeningViolation),
    #[error("assessment error: {0}")]
    Assessment(#[from] AssessmentServiceError),
    #[error("import error: {0}")]
    Import(#[from] AnswerSheetImportError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Screening(_) | AppError::Assessment(_) | AppError::Import(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
