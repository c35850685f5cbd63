//! Rate resolution and reciprocal maintenance.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use cambio_common::{Currency, RateMap};
use cambio_store::LedgerStore;

use crate::error::{FxError, FxResult};

/// Fractional digits kept when deriving a reciprocal rate.
pub const RECIPROCAL_SCALE: u32 = 5;

/// Derive the reverse rate for a directed rate.
///
/// An approximation, not an exact identity: rates that round below the
/// retained precision collapse toward zero, and round-tripping through two
/// reciprocals drifts within the rounding step.
pub fn reciprocal(rate: Decimal) -> Decimal {
    (Decimal::ONE / rate).round_dp(RECIPROCAL_SCALE)
}

/// A request to set the rate for an ordered currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateUpdate {
    pub base_currency: Currency,
    pub counter_currency: Currency,
    /// Units of counter per unit of base; must be strictly positive.
    pub rate: Decimal,
}

/// View over the ledger store's rate record.
pub struct RateTable {
    store: Arc<LedgerStore>,
}

impl RateTable {
    /// Create a rate table over the given store.
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Resolve the directed rate for an ordered currency pair.
    pub async fn get_rate(&self, base: &Currency, counter: &Currency) -> FxResult<Decimal> {
        let rates = self.store.get_rates().await?;
        rates
            .get(base)
            .and_then(|row| row.get(counter))
            .copied()
            .ok_or_else(|| FxError::RateNotFound {
                base: base.clone(),
                counter: counter.clone(),
            })
    }

    /// Write the forward rate and its derived reciprocal.
    ///
    /// Both entries are persisted together as a single logical update of the
    /// rate record. Entries are created implicitly the first time a pair is
    /// set; last writer wins on the forward direction it targets.
    #[instrument(skip(self, update), fields(
        base = %update.base_currency,
        counter = %update.counter_currency,
        rate = %update.rate
    ))]
    pub async fn set_rate(&self, update: &RateUpdate) -> FxResult<RateMap> {
        if update.rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(update.rate));
        }

        let reverse = reciprocal(update.rate);
        let (rates, _) = self
            .store
            .update_rates(|rates| {
                rates
                    .entry(update.base_currency.clone())
                    .or_default()
                    .insert(update.counter_currency.clone(), update.rate);
                rates
                    .entry(update.counter_currency.clone())
                    .or_default()
                    .insert(update.base_currency.clone(), reverse);
            })
            .await?;

        info!(reverse = %reverse, "Rate updated");
        Ok(rates)
    }

    /// Current rate table snapshot.
    pub async fn snapshot(&self) -> FxResult<RateMap> {
        Ok(self.store.get_rates().await?)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use cambio_store::MemoryStore;

    use super::*;

    fn table() -> RateTable {
        RateTable::new(Arc::new(LedgerStore::new(Arc::new(MemoryStore::new()))))
    }

    fn update(base: &str, counter: &str, rate: Decimal) -> RateUpdate {
        RateUpdate {
            base_currency: Currency::new(base),
            counter_currency: Currency::new(counter),
            rate,
        }
    }

    #[tokio::test]
    async fn set_rate_writes_forward_and_reciprocal() {
        let table = table();
        table.set_rate(&update("ARS", "USD", dec!(0.00068))).await.unwrap();

        let forward = table
            .get_rate(&Currency::ars(), &Currency::usd())
            .await
            .unwrap();
        assert_eq!(forward, dec!(0.00068));

        // round(1 / 0.00068, 5)
        let reverse = table
            .get_rate(&Currency::usd(), &Currency::ars())
            .await
            .unwrap();
        assert_eq!(reverse, dec!(1470.58824));
    }

    #[tokio::test]
    async fn last_writer_wins_on_the_targeted_direction() {
        let table = table();
        table.set_rate(&update("ARS", "USD", dec!(0.00068))).await.unwrap();
        table.set_rate(&update("USD", "ARS", dec!(1469))).await.unwrap();

        let forward = table
            .get_rate(&Currency::usd(), &Currency::ars())
            .await
            .unwrap();
        assert_eq!(forward, dec!(1469));

        // The second write re-derived the ARS->USD side.
        let reverse = table
            .get_rate(&Currency::ars(), &Currency::usd())
            .await
            .unwrap();
        assert_eq!(reverse, reciprocal(dec!(1469)));
    }

    #[tokio::test]
    async fn non_positive_rates_are_rejected() {
        let table = table();
        let result = table.set_rate(&update("ARS", "USD", Decimal::ZERO)).await;
        assert!(matches!(result, Err(FxError::InvalidRate(_))));

        let result = table.set_rate(&update("ARS", "USD", dec!(-1.5))).await;
        assert!(matches!(result, Err(FxError::InvalidRate(_))));
    }

    #[tokio::test]
    async fn missing_pair_is_rate_not_found() {
        let table = table();
        let result = table.get_rate(&Currency::ars(), &Currency::usd()).await;
        assert!(matches!(result, Err(FxError::RateNotFound { .. })));
    }

    #[tokio::test]
    async fn snapshot_reflects_all_updates() {
        let table = table();
        table.set_rate(&update("ARS", "USD", dec!(0.00068))).await.unwrap();
        table.set_rate(&update("ARS", "EUR", dec!(0.00057))).await.unwrap();

        let snapshot = table.snapshot().await.unwrap();
        assert_eq!(snapshot[&Currency::ars()].len(), 2);
        assert_eq!(snapshot[&Currency::usd()].len(), 1);
        assert_eq!(snapshot[&Currency::eur()].len(), 1);
    }

    proptest! {
        #[test]
        fn reciprocal_stays_within_rounding_drift(
            n in 1u32..1_000_000,
            d in 1u32..1_000_000,
        ) {
            let rate = Decimal::from(n) / Decimal::from(d);
            prop_assume!(rate > dec!(0.00001) && rate < dec!(100000));

            let reverse = reciprocal(rate);
            prop_assert!(reverse > Decimal::ZERO);
            prop_assert!(reverse.scale() <= RECIPROCAL_SCALE);

            let exact = Decimal::ONE / rate;
            prop_assert!((reverse - exact).abs() <= dec!(0.000005));
        }
    }
}
