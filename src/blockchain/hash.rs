use sha2::{Digest, Sha256};

/// SHA-256 over the textual concatenation `timestamp || payload || prev_hash || nonce`,
/// with both integers rendered in base 10. Returned as lowercase hex.
///
/// The preimage layout is part of the ledger format: changing it changes every digest.
pub fn digest(timestamp: i64, payload: &str, prev_hash: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(payload.as_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// True when `hash` starts with `difficulty` hex zeros.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let d = difficulty as usize;
    hash.len() >= d && hash.bytes().take(d).all(|b| b == b'0')
}
