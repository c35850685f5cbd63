//! Engine error types.

use thiserror::Error;

use cambio_fx::FxError;
use cambio_ledger::LedgerError;
use cambio_store::StoreError;

/// Faults that reject an engine call without producing a result.
///
/// Business-outcome failures (insufficient funds, a failed transfer phase)
/// are not errors: they come back as a normal [`ExchangeResult`] with
/// `ok = false`. Only resolution faults (a missing rate or internal
/// account) and storage faults surface here.
///
/// [`ExchangeResult`]: cambio_common::ExchangeResult
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rate resolution failed.
    #[error(transparent)]
    Fx(#[from] FxError),

    /// Internal account resolution or mutation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The storage layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
