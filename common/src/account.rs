//! Internal exchange accounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Currency};

/// An account owned by the exchange service itself.
///
/// The internal directory holds one account per supported currency; each
/// exchange settles against the accounts holding its base and counter
/// currencies. Balances are non-negative and mutated only through the
/// directory's balance-update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier, assigned at creation, never reused.
    pub id: AccountId,
    /// Currency this account holds.
    pub currency: Currency,
    /// Current balance in the account's currency.
    pub balance: Decimal,
}

impl Account {
    /// Create a new account.
    pub fn new(id: impl Into<AccountId>, currency: Currency, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            currency,
            balance,
        }
    }
}
