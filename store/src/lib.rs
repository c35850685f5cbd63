//! Cambio Ledger Store
//!
//! Durable key-value storage for the exchange service. The store holds three
//! top-level records (the account collection, the rate table, and the
//! transaction log), each read and replaced as a whole JSON document.
//!
//! The [`KeyValueStore`] trait is the integration point for a real durable
//! backend; [`MemoryStore`] is the in-process reference implementation used
//! by the server binary and the test suite.

pub mod error;
pub mod kv;
pub mod state;

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use state::LedgerStore;
