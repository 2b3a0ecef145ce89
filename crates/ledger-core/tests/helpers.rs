#![allow(dead_code)]

use ledger_core::{Block, BlockChain};

pub const BASE_TIMESTAMP: i64 = 1_600_000_000;

/// Appends a block that links onto the current tail.
pub fn push_linked(chain: &mut BlockChain, data: &str, nonce: u64) -> Block {
    let block = Block::linked_to(chain.back(), data, nonce);
    chain.append(block.clone());
    block
}

/// Data, timestamp and nonce only; previous hashes are expected to differ.
pub fn payloads(chain: &BlockChain) -> Vec<(String, i64, u64)> {
    chain
        .iter()
        .skip(1)
        .map(|b| (b.data().to_owned(), b.timestamp(), b.nonce()))
        .collect()
}

/// Rendered `data`, `prev hash` and `nonce` lines of every block, in order.
/// Timestamp and hash lines are left out.
pub fn stable_lines(chain: &BlockChain) -> Vec<String> {
    chain
        .to_string()
        .lines()
        .filter(|line| {
            line.starts_with("data ") || line.starts_with("prev hash ") || line.starts_with("nonce ")
        })
        .map(str::to_owned)
        .collect()
}

/// Expected `stable_lines` entries for one block.
pub fn expected_lines(data: &str, previous_hash: u64, nonce: u64) -> Vec<String> {
    vec![
        format!("data {data}"),
        format!("prev hash {previous_hash}"),
        format!("nonce {nonce}"),
    ]
}
