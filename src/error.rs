//! Domain error types for the blog server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};

use crate::services::flash;

/// Field name -> messages, as shown next to form inputs.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Malformed request (bad JSON, unknown enum value, bad query parameter)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Form input failed field-level validation
    #[error("Please correct the errors below")]
    Validation(FieldErrors),

    /// Caller is authenticated but not allowed to perform the action
    #[error("{0}")]
    Forbidden(String),

    /// Login credentials did not match; never says which part was wrong
    #[error("Invalid credentials")]
    AuthenticationFailed,

    /// Unexpected failure outside the database (hashing, token signing)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a validation error for a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden(_) => StatusCode::SEE_OTHER,
            AppError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, response_message, fields) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(err_str) => {
                tracing::error!("Internal error: {}", err_str);
                (
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(_) => ("NOT_FOUND", self.to_string(), None),
            AppError::InvalidInput(_) => ("INVALID_INPUT", self.to_string(), None),
            AppError::Validation(errors) => {
                ("VALIDATION_FAILED", self.to_string(), Some(errors.clone()))
            }
            AppError::Forbidden(_) => ("FORBIDDEN", self.to_string(), None),
            AppError::AuthenticationFailed => ("AUTHENTICATION_FAILED", self.to_string(), None),
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
            fields,
        };

        // Forbidden bounces the user home with the reason as a flash message.
        if let AppError::Forbidden(message) = self {
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .cookie(flash::flash_cookie(message))
                .json(body);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-level messages, present for validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid value ({})", e.code),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", err))
    }
}
