//! Cambio Shared Types
//!
//! This crate contains the domain types shared across the Cambio exchange
//! service: currency codes, identifiers, internal accounts, and the exchange
//! request/result records that make up the transaction log.

pub mod account;
pub mod currency;
pub mod exchange;
pub mod identifiers;
pub mod time;

pub use account::*;
pub use currency::*;
pub use exchange::*;
pub use identifiers::*;
pub use time::*;
