//! Response types for the payslip parser API.
//!
//! This module defines the success and error response structures and the
//! mapping from library errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseError};

/// Response body for the `/archive-name` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveNameResponse {
    /// The name the payslip would be archived under.
    pub file_name: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ParseError> for ApiErrorResponse {
    fn from(error: ParseError) -> Self {
        let code = match &error {
            ParseError::ExhaustedInput { .. } => "EXHAUSTED_INPUT",
            ParseError::StructuralMismatch { .. } => "STRUCTURAL_MISMATCH",
            ParseError::NumericFormat { .. } => "NUMERIC_FORMAT",
            ParseError::DateFormat { .. } => "DATE_FORMAT",
        };
        ApiErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::with_details(
                code,
                error.to_string(),
                format!("line {} of '{}'", error.line(), error.document_id()),
            ),
        }
    }
}

impl From<ConfigError> for ApiErrorResponse {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            ConfigError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
