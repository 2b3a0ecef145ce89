use crate::constants::{DEFAULT_NONCE, GENESIS_PREVIOUS_HASH, TIMESTAMP_FORMAT};
use crate::hash::fingerprint;
use crate::Timestamp;
use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ledger entry. Fields are fixed at construction; the hash is
/// always derived, never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    timestamp: Timestamp,
    data: String,
    previous_hash: u64,
    nonce: u64,
}

fn now() -> Timestamp {
    Utc::now().timestamp()
}

impl Block {
    pub fn new(data: impl Into<String>) -> Self {
        Self::with_previous(data, GENESIS_PREVIOUS_HASH)
    }

    pub fn with_previous(data: impl Into<String>, previous_hash: u64) -> Self {
        Self::with_nonce(data, previous_hash, DEFAULT_NONCE)
    }

    pub fn with_nonce(data: impl Into<String>, previous_hash: u64, nonce: u64) -> Self {
        Self::with_timestamp(data, previous_hash, nonce, now())
    }

    /// Fully explicit constructor. Used when a block has to be rebuilt with
    /// its original timestamp.
    pub fn with_timestamp(
        data: impl Into<String>,
        previous_hash: u64,
        nonce: u64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            timestamp,
            data: data.into(),
            previous_hash,
            nonce,
        }
    }

    /// Empty block stamped with the current time and a zero previous hash.
    pub fn genesis() -> Self {
        Self::new(String::new())
    }

    /// New block whose previous hash is `prev`'s fingerprint.
    pub fn linked_to(prev: &Block, data: impl Into<String>, nonce: u64) -> Self {
        Self::with_nonce(data, prev.hash(), nonce)
    }

    /// Successor of this block with the default nonce.
    pub fn next(&self, data: impl Into<String>) -> Self {
        Self::linked_to(self, data, DEFAULT_NONCE)
    }

    /// Copy of this block with the same data, timestamp and nonce but pointing
    /// at `previous_hash`.
    pub fn relink(&self, previous_hash: u64) -> Self {
        Self::with_timestamp(self.data.clone(), previous_hash, self.nonce, self.timestamp)
    }

    /// 64-bit fingerprint of all four fields. Not a security primitive.
    pub fn hash(&self) -> u64 {
        fingerprint(self.timestamp, &self.data, self.previous_hash, self.nonce)
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn previous_hash(&self) -> u64 {
        self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::genesis()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.data == other.data
            && self.previous_hash == other.previous_hash
            && self.nonce == other.nonce
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Local.timestamp_opt(self.timestamp, 0).single() {
            Some(local) => writeln!(f, "timestamp {}", local.format(TIMESTAMP_FORMAT))?,
            None => writeln!(f, "timestamp {}", self.timestamp)?,
        }
        writeln!(f, "data {}", self.data)?;
        writeln!(f, "prev hash {}", self.previous_hash)?;
        writeln!(f, "hash {}", self.hash())?;
        writeln!(f, "nonce {}", self.nonce)
    }
}
