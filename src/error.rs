use thiserror::Error;

/// Errors raised while building, mining or inspecting a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid difficulty {difficulty}: must be at most {max} leading zeros")]
    InvalidDifficulty { difficulty: u32, max: u32 },

    #[error("no nonce in the u64 range satisfies difficulty {difficulty}")]
    NonceSpaceExhausted { difficulty: u32 },

    #[error("failed to build mining thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("genesis block is malformed")]
    InvalidGenesis,

    #[error("block #{index} does not link to its predecessor")]
    BrokenLink { index: usize },

    #[error("block #{index} hash does not match its contents")]
    HashMismatch { index: usize },

    #[error("block #{index} hash does not meet the chain difficulty")]
    InsufficientWork { index: usize },

    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
