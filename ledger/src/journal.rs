//! The append-only transaction journal.

use std::sync::Arc;

use tracing::info;

use cambio_common::ExchangeResult;
use cambio_store::LedgerStore;

use crate::error::LedgerResult;

/// View over the ledger store's log record.
///
/// Every exchange attempt is recorded exactly once, in call order, whatever
/// its outcome. Entries are immutable once written and never removed.
pub struct TransactionJournal {
    store: Arc<LedgerStore>,
}

impl TransactionJournal {
    /// Create a journal over the given store.
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// All recorded attempts, oldest first.
    pub async fn entries(&self) -> LedgerResult<Vec<ExchangeResult>> {
        Ok(self.store.get_log().await?)
    }

    /// Record one exchange attempt.
    pub async fn record(&self, entry: &ExchangeResult) -> LedgerResult<()> {
        self.store.append_log(entry).await?;
        info!(entry = %entry.id, ok = entry.ok, "Transaction recorded");
        Ok(())
    }
}
