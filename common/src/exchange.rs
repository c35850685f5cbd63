//! Exchange requests, results, and the transaction log entry shape.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{now, AccountId, Currency, EntryId, Timestamp};

/// A client's request to convert an amount between two currencies.
///
/// The account identifiers name the *client's* external accounts, not the
/// internal directory; they are only ever handed to the transfer gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    /// Currency the client is converting from.
    pub base_currency: Currency,
    /// Currency the client is converting to.
    pub counter_currency: Currency,
    /// Client account to withdraw the base amount from.
    pub base_account_id: AccountId,
    /// Client account to pay the counter amount into.
    pub counter_account_id: AccountId,
    /// Positive amount to convert, in the base currency.
    pub base_amount: Decimal,
}

/// Why an exchange attempt did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The internal counter-currency account cannot cover the computed amount.
    InsufficientCounterFunds,
    /// Phase 1 failed: the base amount could not be withdrawn from the client.
    WithdrawalFailed,
    /// Phase 2 failed: the counter amount could not be paid out to the client.
    PayoutFailed,
}

impl FailureReason {
    /// The observation text recorded on the transaction log entry.
    pub fn observation(&self) -> &'static str {
        match self {
            FailureReason::InsufficientCounterFunds => {
                "Not enough funds on counter currency account"
            }
            FailureReason::WithdrawalFailed => "Could not withdraw from clients' account",
            FailureReason::PayoutFailed => "Could not transfer to clients' account",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.observation())
    }
}

/// The outcome of one exchange attempt.
///
/// Doubles as the transaction log entry: every attempt is recorded exactly
/// once, verbatim, and entries are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResult {
    /// Globally unique identifier, generated at request time.
    pub id: EntryId,
    /// When the attempt was made.
    pub ts: Timestamp,
    /// Whether the exchange settled.
    pub ok: bool,
    /// Verbatim copy of the originating request.
    pub request: ExchangeRequest,
    /// The directed rate used for computation.
    pub exchange_rate: Decimal,
    /// Computed counter-currency amount; zero when the exchange did not
    /// complete.
    pub counter_amount: Decimal,
    /// Human-readable failure reason; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl ExchangeResult {
    /// Start a result record for an attempt whose outcome is not yet known.
    ///
    /// Defaults mirror the failure shape: `ok = false`, zero counter amount,
    /// no observation.
    pub fn pending(request: ExchangeRequest, exchange_rate: Decimal) -> Self {
        Self {
            id: EntryId::new(),
            ts: now(),
            ok: false,
            request,
            exchange_rate,
            counter_amount: Decimal::ZERO,
            observation: None,
        }
    }

    /// Finalize as settled with the computed counter amount.
    pub fn settled(mut self, counter_amount: Decimal) -> Self {
        self.ok = true;
        self.counter_amount = counter_amount;
        self.observation = None;
        self
    }

    /// Finalize as failed with the given reason.
    pub fn failed(mut self, reason: FailureReason) -> Self {
        self.ok = false;
        self.counter_amount = Decimal::ZERO;
        self.observation = Some(reason.observation().to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn request() -> ExchangeRequest {
        ExchangeRequest {
            base_currency: Currency::ars(),
            counter_currency: Currency::usd(),
            base_account_id: AccountId::new("client-ars"),
            counter_account_id: AccountId::new("client-usd"),
            base_amount: dec!(1000000),
        }
    }

    #[test]
    fn request_uses_camel_case_wire_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["baseCurrency"], "ARS");
        assert_eq!(json["counterAccountId"], "client-usd");
        assert!(json.get("base_currency").is_none());
    }

    #[test]
    fn settled_result_carries_amount_and_no_observation() {
        let result = ExchangeResult::pending(request(), dec!(0.00068)).settled(dec!(680));
        assert!(result.ok);
        assert_eq!(result.counter_amount, dec!(680));
        assert_eq!(result.observation, None);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("observation").is_none());
        assert_eq!(json["exchangeRate"], "0.00068");
    }

    #[test]
    fn failed_result_records_observation_and_zero_amount() {
        let result =
            ExchangeResult::pending(request(), dec!(0.00068)).failed(FailureReason::PayoutFailed);
        assert!(!result.ok);
        assert_eq!(result.counter_amount, Decimal::ZERO);
        assert_eq!(
            result.observation.as_deref(),
            Some("Could not transfer to clients' account")
        );
    }
}
