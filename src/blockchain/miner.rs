use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::MAX_DIFFICULTY;
use super::hash::{digest, meets_difficulty};
use crate::error::{LedgerError, Result};

/// Default number of nonces handed to the pool per round in parallel mode.
const PARALLEL_BATCH: u64 = 1 << 16;

/// Sequential search logs progress every this many nonces.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Winning nonce and the digest it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seal {
    pub nonce: u64,
    pub hash: String,
}

/// Reject difficulties that a 64-char hex digest can never satisfy.
pub fn check_difficulty(difficulty: u32) -> Result<()> {
    if difficulty > MAX_DIFFICULTY {
        return Err(LedgerError::InvalidDifficulty {
            difficulty,
            max: MAX_DIFFICULTY,
        });
    }
    Ok(())
}

/// Find the lowest nonce whose digest has `difficulty` leading hex zeros.
///
/// Nonces are tried in order from 0, so the result is fully determined by the
/// block content. The counter never wraps: if all of `u64` is exhausted the
/// search fails with [`LedgerError::NonceSpaceExhausted`].
pub fn seal(difficulty: u32, timestamp: i64, payload: &str, prev_hash: &str) -> Result<Seal> {
    check_difficulty(difficulty)?;

    for nonce in 0..=u64::MAX {
        let hash = digest(timestamp, payload, prev_hash, nonce);
        if meets_difficulty(&hash, difficulty) {
            return Ok(Seal { nonce, hash });
        }
        if nonce > 0 && nonce % PROGRESS_INTERVAL == 0 {
            debug!("MINER - {} nonces tried (difficulty={})", nonce, difficulty);
        }
    }

    Err(LedgerError::NonceSpaceExhausted { difficulty })
}

/// Same result as [`seal`], searched batch by batch on `pool`.
///
/// Within a batch `find_map_first` returns the lowest matching nonce, and
/// batches are visited in ascending order, so the winner is the sequential one.
fn seal_on_pool(
    pool: &ThreadPool,
    batch: u64,
    difficulty: u32,
    timestamp: i64,
    payload: &str,
    prev_hash: &str,
) -> Result<Seal> {
    check_difficulty(difficulty)?;

    let mut start: u64 = 0;
    loop {
        let end = start.saturating_add(batch - 1);
        let found = pool.install(|| {
            (start..=end).into_par_iter().find_map_first(|nonce| {
                let hash = digest(timestamp, payload, prev_hash, nonce);
                meets_difficulty(&hash, difficulty).then(|| Seal { nonce, hash })
            })
        });

        if let Some(seal) = found {
            return Ok(seal);
        }
        if end == u64::MAX {
            return Err(LedgerError::NonceSpaceExhausted { difficulty });
        }
        if (end + 1) / PROGRESS_INTERVAL != start / PROGRESS_INTERVAL {
            debug!(
                "MINER - {} nonces tried on {} threads (difficulty={})",
                end + 1,
                pool.current_num_threads(),
                difficulty
            );
        }
        start = end + 1;
    }
}

/// Proof-of-Work searcher bound to a fixed difficulty.
///
/// Built with one thread it runs the plain sequential loop; with more it owns
/// a rayon pool. Both modes return the same (lowest) nonce.
#[derive(Debug)]
pub struct Miner {
    difficulty: u32,
    pool: Option<ThreadPool>,
    batch: u64,
}

impl Miner {
    /// Sequential miner.
    pub fn new(difficulty: u32) -> Result<Self> {
        check_difficulty(difficulty)?;
        Ok(Self {
            difficulty,
            pool: None,
            batch: PARALLEL_BATCH,
        })
    }

    /// Miner that spreads each search over `threads` workers.
    pub fn parallel(difficulty: u32, threads: usize) -> Result<Self> {
        if threads <= 1 {
            return Self::new(difficulty);
        }
        check_difficulty(difficulty)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("miner-{i}"))
            .build()?;
        Ok(Self {
            difficulty,
            pool: Some(pool),
            batch: PARALLEL_BATCH,
        })
    }

    #[cfg(test)]
    fn with_batch(mut self, batch: u64) -> Self {
        self.batch = batch.max(1);
        self
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    pub fn seal(&self, timestamp: i64, payload: &str, prev_hash: &str) -> Result<Seal> {
        match &self.pool {
            Some(pool) => seal_on_pool(
                pool,
                self.batch,
                self.difficulty,
                timestamp,
                payload,
                prev_hash,
            ),
            None => seal(self.difficulty, timestamp, payload, prev_hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Miner, seal};
    use crate::blockchain::hash::{digest, meets_difficulty};
    use crate::error::LedgerError;

    const TS: i64 = 1_700_000_000;

    #[test]
    fn difficulty_zero_takes_first_nonce() {
        let s = seal(0, TS, "anything", "prev").unwrap();
        assert_eq!(s.nonce, 0);
        assert_eq!(s.hash, digest(TS, "anything", "prev", 0));
    }

    #[test]
    fn finds_known_nonces() {
        let s = seal(2, TS, "Genesis Block", "").unwrap();
        assert_eq!(s.nonce, 100);
        assert_eq!(
            s.hash,
            "00cbcfadabe88e3708ca5a6618eb9b66a63304064ed113b69946c5a6d50e54b0"
        );

        let s = seal(1, TS, "hello", "abc").unwrap();
        assert_eq!(s.nonce, 15);

        let s = seal(3, TS, "Send 1 BTC to Alex", "00ab").unwrap();
        assert_eq!(s.nonce, 3946);
        assert!(s.hash.starts_with("000"));
    }

    #[test]
    fn returned_nonce_is_the_lowest() {
        let s = seal(2, TS, "minimal", "prev").unwrap();
        for nonce in 0..s.nonce {
            assert!(!meets_difficulty(&digest(TS, "minimal", "prev", nonce), 2));
        }
        assert_eq!(seal(2, TS, "minimal", "prev").unwrap(), s);
    }

    #[test]
    fn rejects_unreachable_difficulty() {
        assert!(matches!(
            seal(65, TS, "x", ""),
            Err(LedgerError::InvalidDifficulty { difficulty: 65, max: 64 })
        ));
        assert!(Miner::new(65).is_err());
        assert!(Miner::parallel(70, 4).is_err());
        assert!(Miner::new(64).is_ok());
    }

    #[test]
    fn parallel_matches_sequential() {
        let miner = Miner::parallel(3, 4).unwrap();
        assert_eq!(miner.threads(), 4);
        let par = miner.seal(TS, "Send 1 BTC to Alex", "00ab").unwrap();
        let seq = seal(3, TS, "Send 1 BTC to Alex", "00ab").unwrap();
        assert_eq!(par, seq);
        assert_eq!(par.nonce, 3946);
    }

    #[test]
    fn parallel_matches_sequential_across_batches() {
        let cases: [(u32, &str, &str, u64); 3] = [
            (3, "Send 1 BTC to Alex", "00ab", 3946),
            (2, "Genesis Block", "", 100),
            (1, "hello", "abc", 15),
        ];
        for (difficulty, payload, prev_hash, nonce) in cases {
            let seq = seal(difficulty, TS, payload, prev_hash).unwrap();
            assert_eq!(seq.nonce, nonce);

            // 64: winner sits in a later batch. nonce: winner opens a batch.
            // nonce + 1: winner closes the first batch.
            for batch in [64, nonce, nonce + 1, 7] {
                let miner = Miner::parallel(difficulty, 4).unwrap().with_batch(batch);
                let par = miner.seal(TS, payload, prev_hash).unwrap();
                assert_eq!(par, seq, "batch={batch} difficulty={difficulty}");
            }
        }
    }

    #[test]
    fn single_thread_request_stays_sequential() {
        let miner = Miner::parallel(2, 1).unwrap();
        assert_eq!(miner.threads(), 1);
        assert_eq!(miner.difficulty(), 2);
        assert_eq!(miner.seal(TS, "Genesis Block", "").unwrap().nonce, 100);
    }
}
