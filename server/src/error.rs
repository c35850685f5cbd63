//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use cambio_engine::EngineError;
use cambio_fx::FxError;
use cambio_ledger::LedgerError;

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request shape or values are unusable.
    #[error("{0}")]
    BadRequest(String),

    /// A fault from the engine or the layers beneath it.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(e) => match e {
                // Data/configuration faults: the request was well-formed but
                // cannot be resolved against current state.
                EngineError::Fx(FxError::RateNotFound { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
                EngineError::Fx(FxError::InvalidRate(_)) => StatusCode::BAD_REQUEST,
                EngineError::Ledger(LedgerError::AccountNotFound(_)) => StatusCode::NOT_FOUND,
                EngineError::Ledger(LedgerError::NoAccountForCurrency(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
