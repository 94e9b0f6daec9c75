//! Error taxonomy and its mapping onto HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by game service operations.
///
/// Validation always precedes mutation, so a returned error guarantees
/// the user record is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Amount or cost was missing, zero, or otherwise unusable.
    #[error("Invalid amount")]
    InvalidAmount,
    /// Balance is below the requested spend.
    #[error("Insufficient bytes")]
    InsufficientBytes,
    /// Balance is below the client-supplied upgrade cost.
    #[error("Insufficient bytes for upgrade")]
    InsufficientBytesForUpgrade,
    /// Unrecognized upgrade track key.
    #[error("Invalid upgrade type")]
    InvalidUpgradeType,
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Unmatched route or missing resource.
    #[error("{0}")]
    NotFound(String),
    /// Unexpected handler failure.
    #[error("Something went wrong!")]
    Internal,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidAmount
            | ServiceError::InsufficientBytes
            | ServiceError::InsufficientBytesForUpgrade
            | ServiceError::InvalidUpgradeType => AppError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
