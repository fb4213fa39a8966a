//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management: validation and mapping
//! failures, authorization refusals, and storage faults all funnel through
//! the same taxonomy and render as the uniform response envelope.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers can
//! return `Result<HttpResponse, AppError>` and use `?` freely. Storage and
//! unexpected failures are logged server-side and surface as a bare
//! `internal` envelope with no detail in the body.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

use crate::envelope::{Envelope, Outcome};

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Shape mismatch or field constraint violation in an inbound record
    /// (HTTP 400, `bad`).
    BadRequest(String),
    /// The request payload could not be assembled at all (HTTP 400,
    /// `invalid`).
    Invalid(String),
    /// Credential mismatch, inactive or expired session, or a taken
    /// username (HTTP 403).
    Forbidden(String),
    /// A requested resource or method was not found (HTTP 404).
    NotFound(String),
    /// A persistence call failed (HTTP 500). The detail is logged, never
    /// sent to the client.
    Storage(String),
    /// Any other unexpected server-side failure (HTTP 500). Same leakage
    /// rule as `Storage`.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Invalid(msg) => write!(f, "Invalid Request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into enveloped `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => Envelope::of(Outcome::Bad).message(msg.clone()).respond(),
            AppError::Invalid(msg) => Envelope::of(Outcome::Invalid).message(msg.clone()).respond(),
            AppError::Forbidden(msg) => {
                Envelope::of(Outcome::Forbidden).message(msg.clone()).respond()
            }
            AppError::NotFound(msg) => {
                Envelope::of(Outcome::NotFound).message(msg.clone()).respond()
            }
            AppError::Storage(detail) => {
                log::error!("storage failure: {}", detail);
                Envelope::of(Outcome::Internal).respond()
            }
            AppError::Internal(detail) => {
                log::error!("internal failure: {}", detail);
                Envelope::of(Outcome::Internal).respond()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::Internal(error.to_string())
    }
}
