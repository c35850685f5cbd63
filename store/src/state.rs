//! Typed record layer over the key-value store.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use cambio_common::{Account, Currency, ExchangeResult, RateMap};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Storage keys for the three top-level records.
pub mod keys {
    /// The internal account collection.
    pub const ACCOUNTS: &str = "accounts";
    /// The rate table.
    pub const RATES: &str = "rates";
    /// The transaction log.
    pub const LOG: &str = "log";
}

/// Default bootstrap data, created exactly once if the records are absent.
mod seed {
    use super::*;

    pub fn default_accounts() -> Vec<Account> {
        vec![
            Account::new("1", Currency::ars(), Decimal::from(120_000_000)),
            Account::new("2", Currency::usd(), Decimal::from(60_000)),
            Account::new("3", Currency::eur(), Decimal::from(40_000)),
            Account::new("4", Currency::brl(), Decimal::from(60_000)),
        ]
    }

    pub fn default_rates() -> RateMap {
        let mut rates = RateMap::new();
        rates.insert(
            Currency::ars(),
            [
                (Currency::brl(), Decimal::new(360, 5)),
                (Currency::eur(), Decimal::new(57, 5)),
                (Currency::usd(), Decimal::new(68, 5)),
            ]
            .into_iter()
            .collect(),
        );
        rates.insert(
            Currency::brl(),
            [(Currency::ars(), Decimal::new(2773, 1))].into_iter().collect(),
        );
        rates.insert(
            Currency::eur(),
            [(Currency::ars(), Decimal::from(1741))].into_iter().collect(),
        );
        rates.insert(
            Currency::usd(),
            [(Currency::ars(), Decimal::from(1469))].into_iter().collect(),
        );
        rates
    }
}

/// The sole owner of persisted exchange state.
///
/// Three records back the service: the account collection, the rate table,
/// and the transaction log. Each is stored as one JSON document and read or
/// replaced as a whole. Read-modify-write cycles go through the `update_*`
/// operations, which serialize on an internal mutex so every record change
/// is one logical update; the key-value interface itself has no
/// transactions, and updates to *different* records are still independent
/// writes.
pub struct LedgerStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LedgerStore {
    /// Create a store over the given key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Create the default records exactly once if they are absent:
    /// four seed accounts, the seed rate table, and an empty log.
    pub async fn bootstrap(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        if !self.kv.exists(keys::ACCOUNTS).await? {
            self.write_record(keys::ACCOUNTS, &seed::default_accounts())
                .await?;
            info!("Seeded default account collection");
        }

        if !self.kv.exists(keys::RATES).await? {
            self.write_record(keys::RATES, &seed::default_rates()).await?;
            info!("Seeded default rate table");
        }

        if !self.kv.exists(keys::LOG).await? {
            self.write_record(keys::LOG, &Vec::<ExchangeResult>::new())
                .await?;
            info!("Initialized empty transaction log");
        }

        Ok(())
    }

    /// Read the account collection (empty when absent).
    pub async fn get_accounts(&self) -> StoreResult<Vec<Account>> {
        self.read_record(keys::ACCOUNTS).await
    }

    /// Replace the full account collection.
    pub async fn set_accounts(&self, accounts: &[Account]) -> StoreResult<()> {
        self.write_record(keys::ACCOUNTS, &accounts).await
    }

    /// Apply one logical update to the account collection.
    ///
    /// Returns the updated collection together with the closure's result.
    pub async fn update_accounts<F, R>(&self, mutate: F) -> StoreResult<(Vec<Account>, R)>
    where
        F: FnOnce(&mut Vec<Account>) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut accounts: Vec<Account> = self.read_record(keys::ACCOUNTS).await?;
        let out = mutate(&mut accounts);
        self.write_record(keys::ACCOUNTS, &accounts).await?;
        Ok((accounts, out))
    }

    /// Read the rate table (empty when absent).
    pub async fn get_rates(&self) -> StoreResult<RateMap> {
        self.read_record(keys::RATES).await
    }

    /// Replace the full rate table.
    pub async fn set_rates(&self, rates: &RateMap) -> StoreResult<()> {
        self.write_record(keys::RATES, rates).await
    }

    /// Apply one logical update to the rate table.
    pub async fn update_rates<F, R>(&self, mutate: F) -> StoreResult<(RateMap, R)>
    where
        F: FnOnce(&mut RateMap) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut rates: RateMap = self.read_record(keys::RATES).await?;
        let out = mutate(&mut rates);
        self.write_record(keys::RATES, &rates).await?;
        Ok((rates, out))
    }

    /// Read the transaction log, oldest first (empty when absent).
    pub async fn get_log(&self) -> StoreResult<Vec<ExchangeResult>> {
        self.read_record(keys::LOG).await
    }

    /// Append one entry to the transaction log.
    pub async fn append_log(&self, entry: &ExchangeResult) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut log: Vec<ExchangeResult> = self.read_record(keys::LOG).await?;
        log.push(entry.clone());
        self.write_record(keys::LOG, &log).await
    }

    async fn read_record<T>(&self, key: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.kv.get(key).await? {
            Some(document) => Ok(serde_json::from_str(&document)?),
            None => Ok(T::default()),
        }
    }

    async fn write_record<T>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let document = serde_json::to_string(value)?;
        self.kv.set(key, document).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use cambio_common::{AccountId, ExchangeRequest};

    use crate::MemoryStore;

    use super::*;

    fn store() -> LedgerStore {
        LedgerStore::new(Arc::new(MemoryStore::new()))
    }

    fn entry(amount: Decimal) -> ExchangeResult {
        let request = ExchangeRequest {
            base_currency: Currency::ars(),
            counter_currency: Currency::usd(),
            base_account_id: AccountId::new("client-ars"),
            counter_account_id: AccountId::new("client-usd"),
            base_amount: amount,
        };
        ExchangeResult::pending(request, dec!(0.00068))
    }

    #[tokio::test]
    async fn bootstrap_seeds_all_three_records() {
        let store = store();
        store.bootstrap().await.unwrap();

        let accounts = store.get_accounts().await.unwrap();
        assert_eq!(accounts.len(), 4);
        assert_eq!(accounts[0].currency, Currency::ars());
        assert_eq!(accounts[0].balance, dec!(120000000));

        let rates = store.get_rates().await.unwrap();
        assert_eq!(rates[&Currency::ars()][&Currency::usd()], dec!(0.00068));
        assert_eq!(rates[&Currency::usd()][&Currency::ars()], dec!(1469));

        assert!(store.get_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bootstrap_runs_exactly_once() {
        let store = store();
        store.bootstrap().await.unwrap();

        let (_, found) = store
            .update_accounts(|accounts| {
                accounts[1].balance = dec!(999);
                true
            })
            .await
            .unwrap();
        assert!(found);

        // A second bootstrap over the same backend must not reseed.
        store.bootstrap().await.unwrap();
        let accounts = store.get_accounts().await.unwrap();
        assert_eq!(accounts[1].balance, dec!(999));
    }

    #[tokio::test]
    async fn records_default_to_empty_when_absent() {
        let store = store();
        assert!(store.get_accounts().await.unwrap().is_empty());
        assert!(store.get_rates().await.unwrap().is_empty());
        assert!(store.get_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn log_appends_preserve_order() {
        let store = store();
        store.bootstrap().await.unwrap();

        let first = entry(dec!(1));
        let second = entry(dec!(2));
        store.append_log(&first).await.unwrap();
        store.append_log(&second).await.unwrap();

        let log = store.get_log().await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].id, first.id);
        assert_eq!(log[1].id, second.id);
    }

    #[tokio::test]
    async fn update_accounts_returns_closure_result() {
        let store = store();
        store.bootstrap().await.unwrap();

        let (accounts, position) = store
            .update_accounts(|accounts| {
                accounts.iter().position(|a| a.currency == Currency::usd())
            })
            .await
            .unwrap();
        assert_eq!(position, Some(1));
        assert_eq!(accounts.len(), 4);
    }
}
