//! In-memory hash-linked ledger.
//!
//! A [`Block`] carries a timestamp, a payload, the fingerprint of its
//! predecessor and a nonce. A [`BlockChain`] keeps blocks in order behind a
//! genesis anchor and checks the links on demand.

pub mod block;
pub mod chain;
pub mod constants;
pub mod error;
pub mod hash;

pub use block::Block;
pub use chain::{BlockChain, Validation};
pub use error::{ChainError, Result};

/// Seconds since the Unix epoch.
pub type Timestamp = i64;
