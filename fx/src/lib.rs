//! Cambio Rate Table
//!
//! Directed exchange rates backed by the ledger store's rate record.
//!
//! Every update writes the targeted forward rate together with its
//! reciprocal, so that for any stored pair (A, B) the reverse pair (B, A)
//! approximately equals `1 / rate`, rounded to a fixed precision. The
//! rounding drift is expected and accepted.

pub mod error;
pub mod table;

pub use error::{FxError, FxResult};
pub use table::{reciprocal, RateTable, RateUpdate, RECIPROCAL_SCALE};
