//! Rate table error types.

use rust_decimal::Decimal;
use thiserror::Error;

use cambio_common::Currency;
use cambio_store::StoreError;

/// Errors that can occur in the rate table.
#[derive(Debug, Error)]
pub enum FxError {
    /// No entry exists for the ordered currency pair.
    #[error("No rate found for {base}/{counter}")]
    RateNotFound { base: Currency, counter: Currency },

    /// Rates must be strictly positive.
    #[error("Invalid rate {0}: rates must be positive")]
    InvalidRate(Decimal),

    /// The underlying rate record could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for rate table operations.
pub type FxResult<T> = Result<T, FxError>;
