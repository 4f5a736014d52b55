use serde::Serialize;

use crate::blockchain::{Block, Blockchain};
use crate::error::Result;

/* ---------- JSON view ---------- */

#[derive(Serialize)]
pub struct ChainReport<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub valid: bool,
    pub chain: Vec<&'a Block>,
}

impl<'a> ChainReport<'a> {
    pub fn new(bc: &'a Blockchain) -> Self {
        Self {
            length: bc.len(),
            difficulty: bc.difficulty(),
            valid: bc.is_valid_chain(),
            chain: bc.iter().collect(),
        }
    }
}

pub fn render_json(bc: &Blockchain) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ChainReport::new(bc))?)
}

/* ---------- Console view ---------- */

/// One section per block, in the layout of the original console demo.
pub fn render_text(bc: &Blockchain) -> String {
    let difficulty = bc.difficulty();
    bc.iter()
        .enumerate()
        .map(|(i, block)| {
            format!(
                "======= Block {i} =======\n\
                 Data:          {}\n\
                 Timestamp:     {}\n\
                 Prev. Hash:    {}\n\
                 Hash:          {}\n\
                 Nonce:         {}\n\
                 PoW Difficulty:  {}\n\n",
                block.payload(),
                block.timestamp(),
                block.prev_hash(),
                block.hash(),
                block.nonce(),
                difficulty,
            )
        })
        .collect()
}
