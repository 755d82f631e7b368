//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions the API can produce: authentication failures,
//! missing resources, uniqueness conflicts, invalid input, and internal faults.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with JSON bodies of the form
//! `{"message": "..."}`. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, and `bcrypt::BcryptError` allow conversion
//! with the `?` operator. Internal details (SQL, driver messages) are logged
//! server-side and never included in a response body.

use actix_web::{error::JsonPayloadError, error::ResponseError, HttpRequest, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, or revoked credentials (HTTP 401).
    Unauthorized(String),
    /// A requested resource is absent, or not owned by the caller (HTTP 404).
    NotFound(String),
    /// A unique field collided with an existing row (HTTP 409).
    Conflict(String),
    /// Input failed validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// An error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Any other unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "message": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "message": msg
            })),
            // The 500 variants keep their detail out of the response body.
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error"
                }))
            }
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}

/// Returns true when a `sqlx::Error` carries a database unique-constraint
/// violation. Used where a collision has a resource-specific meaning, e.g.
/// a duplicate email on registration.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`, unique violations map to `Conflict`,
/// and everything else becomes a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ if is_unique_violation(&error) => {
                AppError::Conflict("Resource already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`,
/// preserving the per-field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Maps JSON body deserialization failures (missing fields, unknown enum
/// variants, malformed JSON) to a 422 validation error, so the whole input
/// validation surface answers with the same status code. Install via
/// `web::JsonConfig::default().error_handler(json_error_handler)`.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(error.to_string()).into()
}
