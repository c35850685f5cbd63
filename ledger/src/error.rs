//! Ledger error types.

use thiserror::Error;

use cambio_common::{AccountId, Currency};
use cambio_store::StoreError;

/// Errors that can occur in the account directory and journal.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No account with the given id exists in the internal directory.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The internal directory holds no account for the given currency.
    #[error("No internal account holds {0}")]
    NoAccountForCurrency(Currency),

    /// The underlying record could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
