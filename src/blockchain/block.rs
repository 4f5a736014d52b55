use chrono::Utc;
use serde::Serialize;

use super::hash::{digest, meets_difficulty};
use super::miner::Miner;
use crate::error::Result;

/// A sealed block. Fields are read-only once the miner has produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    timestamp: i64, // Unix timestamp (UTC)
    payload: String,
    prev_hash: String,
    hash: String,
    nonce: u64, // Proof-of-Work nonce
}

impl Block {
    /// Mine a block stamped with the current time.
    pub fn seal(miner: &Miner, payload: String, prev_hash: String) -> Result<Self> {
        Self::seal_at(miner, Utc::now().timestamp(), payload, prev_hash)
    }

    /// Mine a block with a fixed timestamp.
    pub fn seal_at(
        miner: &Miner,
        timestamp: i64,
        payload: String,
        prev_hash: String,
    ) -> Result<Self> {
        let seal = miner.seal(timestamp, &payload, &prev_hash)?;
        Ok(Self {
            timestamp,
            payload,
            prev_hash,
            hash: seal.hash,
            nonce: seal.nonce,
        })
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Recompute the digest from the stored fields.
    pub fn compute_hash(&self) -> String {
        digest(self.timestamp, &self.payload, &self.prev_hash, self.nonce)
    }

    /// Cached hash matches the content and meets `difficulty`.
    /// (Does NOT check linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.compute_hash() && meets_difficulty(&self.hash, difficulty)
    }
}

#[cfg(test)]
impl Block {
    pub(crate) fn tamper_payload(&mut self, payload: &str) {
        self.payload = payload.to_string();
    }

    pub(crate) fn tamper_prev_hash(&mut self, prev_hash: &str) {
        self.prev_hash = prev_hash.to_string();
    }

    pub(crate) fn tamper_hash(&mut self, hash: &str) {
        self.hash = hash.to_string();
    }

    /// Overwrite the cached hash with the digest of the current fields.
    pub(crate) fn rehash(&mut self) {
        self.hash = self.compute_hash();
    }
}
