//! In-memory, append-only proof-of-work ledger.
//!
//! [`Blockchain`] seals every block with [`Miner`] before linking it to its
//! predecessor; [`blockchain::hash::digest`] defines the block hash.

pub mod blockchain;
pub mod config;
pub mod error;
pub mod report;

pub use blockchain::{Block, Blockchain, Miner};
pub use error::{LedgerError, Result};
