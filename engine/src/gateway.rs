//! The external funds-transfer capability.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use cambio_common::AccountId;

/// Moves a fixed amount from one account to another, asynchronously
/// reporting success or failure.
///
/// No partial transfers: from the caller's perspective either the full
/// amount moves or nothing does. Genuine upstream failure modes
/// (insufficient funds upstream, network failure, timeout) collapse to
/// `false` at this interface; an adapter owns its own retry and timeout
/// policy.
#[async_trait]
pub trait TransferGateway: Send + Sync {
    /// Attempt to move `amount` from `from` to `to`.
    async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Decimal) -> bool;
}

/// Placeholder integration: always succeeds after a random delay.
///
/// Stands in for a real payment backend during development. Its failure
/// rate (none) is not representative of a production integration.
pub struct StubGateway {
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl StubGateway {
    /// Create a stub with the default 200-400 ms delay window.
    pub fn new() -> Self {
        Self::with_delay(200, 400)
    }

    /// Create a stub with a custom delay window in milliseconds.
    pub fn with_delay(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            min_delay_ms,
            max_delay_ms,
        }
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransferGateway for StubGateway {
    async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Decimal) -> bool {
        let delay = rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        debug!(%from, %to, %amount, "Stub transfer completed");
        true
    }
}

/// One recorded gateway call.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCall {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

/// Scriptable gateway for tests: outcomes are consumed front-to-back, and
/// every call is recorded for assertion. An empty script means every
/// transfer succeeds.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockGateway {
    outcomes: parking_lot::Mutex<std::collections::VecDeque<bool>>,
    calls: parking_lot::Mutex<Vec<TransferCall>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockGateway {
    /// Create a gateway whose transfers all succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway with scripted per-call outcomes.
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: parking_lot::Mutex::new(outcomes.into_iter().collect()),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<TransferCall> {
        self.calls.lock().clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TransferGateway for MockGateway {
    async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Decimal) -> bool {
        self.calls.lock().push(TransferCall {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        self.outcomes.lock().pop_front().unwrap_or(true)
    }
}
