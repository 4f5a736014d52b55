pub mod block;
pub mod hash;
pub mod miner;
pub mod model;

pub use block::Block;
pub use miner::Miner;
pub use model::Blockchain;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// A SHA-256 digest is 64 hex chars; more zeros than that can never be met.
pub const MAX_DIFFICULTY: u32 = 64;

/// Payload of the first block of every chain.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREV_HASH: &str = "";
