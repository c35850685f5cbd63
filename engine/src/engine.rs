//! The exchange settlement sequence.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use cambio_common::{Account, ExchangeRequest, ExchangeResult, FailureReason};
use cambio_fx::RateTable;
use cambio_ledger::{AccountDirectory, TransactionJournal};
use cambio_store::LedgerStore;

use crate::error::EngineResult;
use crate::gateway::TransferGateway;

/// Orchestrates one exchange request end-to-end.
///
/// The sequence is deterministic, with no retries: resolve the rate and the
/// internal accounts, check counter-currency funds, run the two transfer
/// phases, commit balances on success, and record the attempt in the
/// journal exactly once whatever the outcome.
///
/// State is request-scoped: balances and rates are re-read at the start of
/// every call, and nothing is cached across requests. The window between
/// the funds check and the balance commit spans both gateway calls without
/// isolation, so concurrent exchanges against the same account can
/// interleave.
pub struct SettlementEngine {
    rates: RateTable,
    directory: AccountDirectory,
    journal: TransactionJournal,
    gateway: Arc<dyn TransferGateway>,
}

impl SettlementEngine {
    /// Create an engine over the given store and transfer gateway.
    pub fn new(store: Arc<LedgerStore>, gateway: Arc<dyn TransferGateway>) -> Self {
        Self {
            rates: RateTable::new(store.clone()),
            directory: AccountDirectory::new(store.clone()),
            journal: TransactionJournal::new(store),
            gateway,
        }
    }

    /// Execute one exchange request.
    ///
    /// Business failures (insufficient counter funds, a failed transfer
    /// phase) come back as a normal result with `ok = false` and an
    /// observation. Only resolution faults (unknown rate, missing internal
    /// account) and storage faults reject the call without a result; those
    /// attempts are not journaled.
    #[instrument(skip(self, request), fields(
        base = %request.base_currency,
        counter = %request.counter_currency,
        base_amount = %request.base_amount,
    ))]
    pub async fn exchange(&self, request: ExchangeRequest) -> EngineResult<ExchangeResult> {
        let exchange_rate = self
            .rates
            .get_rate(&request.base_currency, &request.counter_currency)
            .await?;
        // Full decimal precision is carried into the result and the
        // outbound transfer amount; nothing is rounded here.
        let counter_amount = request.base_amount * exchange_rate;

        let base_account = self
            .directory
            .find_by_currency(&request.base_currency)
            .await?;
        let counter_account = self
            .directory
            .find_by_currency(&request.counter_currency)
            .await?;

        let pending = ExchangeResult::pending(request.clone(), exchange_rate);
        let result = self
            .settle(&request, pending, &base_account, &counter_account, counter_amount)
            .await?;

        self.journal.record(&result).await?;
        Ok(result)
    }

    async fn settle(
        &self,
        request: &ExchangeRequest,
        pending: ExchangeResult,
        base_account: &Account,
        counter_account: &Account,
        counter_amount: Decimal,
    ) -> EngineResult<ExchangeResult> {
        if counter_account.balance < counter_amount {
            warn!(
                available = %counter_account.balance,
                required = %counter_amount,
                "Counter currency account cannot cover the exchange"
            );
            return Ok(pending.failed(FailureReason::InsufficientCounterFunds));
        }

        // Phase 1: withdraw the base amount from the client's account.
        if !self
            .gateway
            .transfer(&request.base_account_id, &base_account.id, request.base_amount)
            .await
        {
            warn!("Inbound transfer failed; nothing moved");
            return Ok(pending.failed(FailureReason::WithdrawalFailed));
        }

        // Phase 2: pay the counter amount out to the client's account.
        if !self
            .gateway
            .transfer(&counter_account.id, &request.counter_account_id, counter_amount)
            .await
        {
            warn!("Outbound transfer failed; returning base amount to client");
            self.compensate(request, base_account).await;
            return Ok(pending.failed(FailureReason::PayoutFailed));
        }

        // Commit both balance changes as one update of the account record.
        self.directory
            .set_balances(&[
                (
                    base_account.id.clone(),
                    base_account.balance + request.base_amount,
                ),
                (
                    counter_account.id.clone(),
                    counter_account.balance - counter_amount,
                ),
            ])
            .await?;

        info!(counter_amount = %counter_amount, "Exchange settled");
        Ok(pending.settled(counter_amount))
    }

    /// Best-effort reversal of phase 1.
    ///
    /// The outcome does not change the result reported to the caller; when
    /// the reversal itself fails, the base amount is stranded mid-transfer
    /// and the only trace is the warning logged here.
    async fn compensate(&self, request: &ExchangeRequest, base_account: &Account) {
        let returned = self
            .gateway
            .transfer(&base_account.id, &request.base_account_id, request.base_amount)
            .await;
        if !returned {
            warn!(
                amount = %request.base_amount,
                account = %base_account.id,
                "Compensation transfer failed; funds stranded mid-transfer"
            );
        }
    }
}
