//! Resolution and mutation of the internal account collection.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use cambio_common::{Account, AccountId, Currency};
use cambio_store::LedgerStore;

use crate::error::{LedgerError, LedgerResult};

/// View over the ledger store's account record.
///
/// The directory is a set keyed by currency: at most one internal account
/// per currency code. Accounts are mutated only through the balance-update
/// operations and never deleted in normal operation.
pub struct AccountDirectory {
    store: Arc<LedgerStore>,
}

impl AccountDirectory {
    /// Create a directory over the given store.
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// The full internal account collection.
    pub async fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.store.get_accounts().await?)
    }

    /// Resolve the internal account holding the given currency.
    pub async fn find_by_currency(&self, currency: &Currency) -> LedgerResult<Account> {
        let accounts = self.store.get_accounts().await?;
        accounts
            .into_iter()
            .find(|account| &account.currency == currency)
            .ok_or_else(|| LedgerError::NoAccountForCurrency(currency.clone()))
    }

    /// Resolve an internal account by identifier.
    pub async fn find_by_id(&self, id: &AccountId) -> LedgerResult<Account> {
        let accounts = self.store.get_accounts().await?;
        accounts
            .into_iter()
            .find(|account| &account.id == id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))
    }

    /// Overwrite one account's balance and persist the full collection.
    pub async fn set_balance(&self, id: &AccountId, balance: Decimal) -> LedgerResult<()> {
        self.set_balances(&[(id.clone(), balance)]).await
    }

    /// Overwrite several balances as one logical update of the account
    /// record. Fails without mutating anything if any id is unknown.
    #[instrument(skip(self, updates), fields(accounts = updates.len()))]
    pub async fn set_balances(&self, updates: &[(AccountId, Decimal)]) -> LedgerResult<()> {
        let (_, missing) = self
            .store
            .update_accounts(|accounts| {
                let missing = updates
                    .iter()
                    .find(|(id, _)| !accounts.iter().any(|account| &account.id == id))
                    .map(|(id, _)| id.clone());
                if missing.is_some() {
                    return missing;
                }

                for (id, balance) in updates {
                    if let Some(account) =
                        accounts.iter_mut().find(|account| &account.id == id)
                    {
                        account.balance = *balance;
                        info!(account = %id, balance = %balance, "Balance overwritten");
                    }
                }
                None
            })
            .await?;

        match missing {
            Some(id) => Err(LedgerError::AccountNotFound(id)),
            None => Ok(()),
        }
    }
}
