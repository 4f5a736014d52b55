use log::info;

use super::hash::meets_difficulty;
use super::miner::Miner;
use super::{Block, GENESIS_PAYLOAD, GENESIS_PREV_HASH};
use crate::error::{LedgerError, Result};

/// Simple in-memory, append-only blockchain with Proof-of-Work.
///
/// The genesis block lives in its own field so a chain can never be empty.
#[derive(Debug)]
pub struct Blockchain {
    genesis: Block,
    blocks: Vec<Block>,
    miner: Miner,
}

impl Blockchain {
    /// Initialize a new blockchain with a sequentially mined genesis block.
    pub fn new(difficulty: u32) -> Result<Self> {
        Self::with_miner(Miner::new(difficulty)?)
    }

    /// Initialize a new blockchain whose blocks are all sealed by `miner`.
    pub fn with_miner(miner: Miner) -> Result<Self> {
        let genesis = Block::seal(
            &miner,
            GENESIS_PAYLOAD.to_string(),
            GENESIS_PREV_HASH.to_string(),
        )?;
        info!(
            "CHAIN - genesis sealed (hash={}, nonce={}, difficulty={})",
            genesis.hash(),
            genesis.nonce(),
            miner.difficulty()
        );
        Ok(Self {
            genesis,
            blocks: Vec::new(),
            miner,
        })
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.blocks.last().unwrap_or(&self.genesis)
    }

    /// Mine and append a new block carrying `payload`.
    pub fn append(&mut self, payload: impl Into<String>) -> Result<&Block> {
        let prev_hash = self.last_block().hash().to_string();
        let block = Block::seal(&self.miner, payload.into(), prev_hash)?;
        Ok(self.push(block))
    }

    /// Same as [`append`](Self::append) with a caller-chosen timestamp.
    pub fn append_at(&mut self, timestamp: i64, payload: impl Into<String>) -> Result<&Block> {
        let prev_hash = self.last_block().hash().to_string();
        let block = Block::seal_at(&self.miner, timestamp, payload.into(), prev_hash)?;
        Ok(self.push(block))
    }

    fn push(&mut self, block: Block) -> &Block {
        info!(
            "CHAIN - sealed block #{} (hash={}, nonce={})",
            self.blocks.len() + 1,
            block.hash(),
            block.nonce()
        );
        self.blocks.push(block);
        self.last_block()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        match index {
            0 => Some(&self.genesis),
            i => self.blocks.get(i - 1),
        }
    }

    /// Blocks in chain order, genesis first.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        std::iter::once(&self.genesis).chain(self.blocks.iter())
    }

    pub fn len(&self) -> usize {
        self.blocks.len() + 1
    }

    pub fn difficulty(&self) -> u32 {
        self.miner.difficulty()
    }

    pub fn miner_threads(&self) -> usize {
        self.miner.threads()
    }

    /// Validate the entire chain: genesis sentinel, linkage, hashes and PoW.
    /// Reports the first offending block.
    pub fn validate(&self) -> Result<()> {
        let difficulty = self.difficulty();

        if self.genesis.prev_hash() != GENESIS_PREV_HASH
            || self.genesis.payload() != GENESIS_PAYLOAD
        {
            return Err(LedgerError::InvalidGenesis);
        }

        let mut prev: Option<&Block> = None;
        for (index, block) in self.iter().enumerate() {
            if let Some(prev) = prev {
                if block.prev_hash() != prev.hash() {
                    return Err(LedgerError::BrokenLink { index });
                }
            }
            if block.hash() != block.compute_hash() {
                return Err(LedgerError::HashMismatch { index });
            }
            if !meets_difficulty(block.hash(), difficulty) {
                return Err(LedgerError::InsufficientWork { index });
            }
            prev = Some(block);
        }

        Ok(())
    }

    pub fn is_valid_chain(&self) -> bool {
        self.validate().is_ok()
    }
}
