//! The exchange service facade.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use cambio_common::{Account, AccountId, ExchangeRequest, ExchangeResult, RateMap};
use cambio_fx::{RateTable, RateUpdate};
use cambio_ledger::{AccountDirectory, TransactionJournal};
use cambio_store::{KeyValueStore, LedgerStore};

use crate::engine::SettlementEngine;
use crate::error::EngineResult;
use crate::gateway::TransferGateway;

/// The service's single entry surface: accounts, rates, log, and exchange.
///
/// Constructed over an injected storage backend and transfer gateway, the
/// two external collaborators, with no process-global state. Opening the
/// service seeds the default records exactly once if they are absent.
pub struct ExchangeService {
    rates: RateTable,
    directory: AccountDirectory,
    journal: TransactionJournal,
    engine: SettlementEngine,
}

impl ExchangeService {
    /// Open the service, bootstrapping seed data on first use of a backend.
    pub async fn open(
        kv: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn TransferGateway>,
    ) -> EngineResult<Self> {
        let store = Arc::new(LedgerStore::new(kv));
        store.bootstrap().await?;
        info!("Exchange service opened");

        Ok(Self {
            rates: RateTable::new(store.clone()),
            directory: AccountDirectory::new(store.clone()),
            journal: TransactionJournal::new(store.clone()),
            engine: SettlementEngine::new(store, gateway),
        })
    }

    /// All internal accounts.
    pub async fn accounts(&self) -> EngineResult<Vec<Account>> {
        Ok(self.directory.accounts().await?)
    }

    /// Overwrite one account's balance.
    pub async fn set_account_balance(
        &self,
        id: &AccountId,
        balance: Decimal,
    ) -> EngineResult<()> {
        Ok(self.directory.set_balance(id, balance).await?)
    }

    /// Current rate table snapshot.
    pub async fn rates(&self) -> EngineResult<RateMap> {
        Ok(self.rates.snapshot().await?)
    }

    /// Set the rate for a currency pair, and the reciprocal rate as well.
    pub async fn set_rate(&self, update: &RateUpdate) -> EngineResult<RateMap> {
        Ok(self.rates.set_rate(update).await?)
    }

    /// The whole transaction log, oldest first.
    pub async fn log(&self) -> EngineResult<Vec<ExchangeResult>> {
        Ok(self.journal.entries().await?)
    }

    /// Execute an exchange operation.
    pub async fn exchange(&self, request: ExchangeRequest) -> EngineResult<ExchangeResult> {
        self.engine.exchange(request).await
    }
}
