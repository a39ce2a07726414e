use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Option<Value>,
    },

    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        detail: Option<String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[source] sqlx::Error),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::ConstraintViolation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    fn log(&self) {
        match self {
            AppError::ConfigurationError(msg) => {
                error!(message = %msg, "Configuration error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::ConstraintViolation { message, detail } => {
                warn!(message = %message, detail = ?detail, "Constraint violation");
            }
            AppError::ValidationError { message, .. } => {
                warn!(message = %message, "Rejected payload");
            }
            AppError::NotFound(_) | AppError::MethodNotAllowed => {}
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation { message, detail } => {
                AppError::ConstraintViolation { message, detail }
            }
            StoreError::Database(e) => AppError::DatabaseError(e),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();

        AppError::ValidationError {
            message: format!("Invalid field(s): {}", fields.join(", ")),
            details: serde_json::to_value(&errors).ok(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Database internals stay in the logs; constraint messages are meant for the client.
        let (public_message, details) = match self {
            AppError::ConfigurationError(msg) => {
                (format!("Server configuration error: {msg}"), None)
            }
            AppError::ValidationError { message, details } => (message, details),
            AppError::ConstraintViolation { message, detail } => {
                (message, detail.map(Value::String))
            }
            AppError::NotFound(msg) => (msg, None),
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
            AppError::MethodNotAllowed => ("Method not allowed".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}
