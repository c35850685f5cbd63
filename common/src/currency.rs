//! Currency codes and the directed rate mapping.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217-style currency code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Currencies of the seed dataset.
    pub fn ars() -> Self {
        Self::new("ARS")
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn brl() -> Self {
        Self::new("BRL")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Directed exchange rates: base currency to counter currency to rate,
/// meaning "1 unit of base = rate units of counter".
///
/// For any stored pair (A, B) the reverse pair (B, A) holds the reciprocal
/// rounded to a fixed precision; the rate table layer maintains that
/// invariant on every update.
pub type RateMap = BTreeMap<Currency, BTreeMap<Currency, Decimal>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_code_is_uppercased() {
        assert_eq!(Currency::new("ars").code(), "ARS");
        assert_eq!(Currency::from("usd"), Currency::usd());
    }

    #[test]
    fn currency_serializes_as_plain_string() {
        let json = serde_json::to_string(&Currency::usd()).unwrap();
        assert_eq!(json, "\"USD\"");
    }
}
