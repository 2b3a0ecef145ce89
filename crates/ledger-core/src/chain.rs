use crate::error::{ChainError, Result};
use crate::Block;
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of a full-chain link scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// First block whose `previous_hash` does not match its predecessor.
    Broken { index: usize, block: Block },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Ordered, never-empty sequence of blocks anchored by a genesis block at
/// index 0.
///
/// Appends are unchecked; link integrity is checked on demand with
/// [`BlockChain::validate`].
#[derive(Clone, Debug)]
pub struct BlockChain {
    chain: Vec<Block>,
}

impl BlockChain {
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Builds a chain from loose blocks, re-linking each one onto a fresh
    /// genesis the same way [`BlockChain::slice`] does.
    pub fn from_blocks<I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        let mut chain = Self::new();
        for block in blocks {
            chain.append_relinked(&block);
        }
        info!(size = chain.size(), "chain built from loose blocks");
        chain
    }

    /// Pushes `block` without checking its link.
    pub fn append(&mut self, block: Block) {
        debug!(size = self.chain.len() + 1, hash = block.hash(), "append block");
        self.chain.push(block);
    }

    fn append_relinked(&mut self, block: &Block) {
        let previous_hash = self.back().hash();
        self.append(block.relink(previous_hash));
    }

    pub fn size(&self) -> usize {
        self.chain.len()
    }

    pub fn genesis(&self) -> &Block {
        &self.chain[0]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.chain.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Block> {
        let size = self.size();
        self.chain
            .get(index)
            .ok_or(ChainError::IndexOutOfRange { index, size })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Block> {
        let size = self.size();
        self.chain
            .get_mut(index)
            .ok_or(ChainError::IndexOutOfRange { index, size })
    }

    /// Legacy lookup: an out-of-range index silently yields the genesis block.
    pub fn get_or_genesis(&self, index: usize) -> &Block {
        self.chain.get(index).unwrap_or(&self.chain[0])
    }

    /// Mutable variant of [`BlockChain::get_or_genesis`].
    pub fn get_or_genesis_mut(&mut self, index: usize) -> &mut Block {
        let index = if index < self.size() { index } else { 0 };
        &mut self.chain[index]
    }

    /// Removes and returns the last block. The genesis block is never removed.
    pub fn pop(&mut self) -> Option<Block> {
        if self.chain.len() > 1 {
            let popped = self.chain.pop();
            debug!(size = self.chain.len(), "pop block");
            popped
        } else {
            None
        }
    }

    pub fn back(&self) -> &Block {
        &self.chain[self.chain.len() - 1]
    }

    pub fn back_mut(&mut self) -> &mut Block {
        let last = self.chain.len() - 1;
        &mut self.chain[last]
    }

    /// Whether the block at `index` chains from the block before it.
    ///
    /// `None` when the question does not apply: index 0 has no predecessor and
    /// indices past the tail have no block.
    pub fn is_link_valid(&self, index: usize) -> Option<bool> {
        if index == 0 || index >= self.size() {
            return None;
        }
        Some(self.chain[index - 1].hash() == self.chain[index].previous_hash())
    }

    /// Scans every link from index 1 and reports the first break.
    pub fn validate(&self) -> Validation {
        for index in 1..self.size() {
            if self.is_link_valid(index) == Some(false) {
                let block = self.chain[index].clone();
                warn!(
                    index,
                    expected = self.chain[index - 1].hash(),
                    found = block.previous_hash(),
                    "broken link"
                );
                return Validation::Broken { index, block };
            }
        }
        Validation::Valid
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Legacy validation signal: a copy of the first broken block, or a copy of
    /// the genesis block when every link holds. Callers compare the result to
    /// their own genesis. Prefer [`BlockChain::validate`].
    pub fn first_broken_or_genesis(&self) -> Block {
        match self.validate() {
            Validation::Valid => self.genesis().clone(),
            Validation::Broken { block, .. } => block,
        }
    }

    /// New chain holding up to `count` blocks from `start` onwards, re-linked
    /// onto a fresh genesis.
    ///
    /// The source genesis is never copied: a `start` of 0 is treated as 1 while
    /// the end bound stays `start + count`, clamped to the chain size. Data,
    /// timestamp and nonce survive; previous hashes are recomputed so the
    /// result validates on its own.
    pub fn slice(&self, start: usize, count: usize) -> BlockChain {
        let first = start.max(1);
        let end = start.saturating_add(count).min(self.size());
        let mut part = BlockChain::new();
        if first < end {
            for block in &self.chain[first..end] {
                part.append_relinked(block);
            }
        }
        debug!(start, count, size = part.size(), "slice chain");
        part
    }

    /// Appends every non-genesis block of `other`, in order, without
    /// re-linking. The seam only validates if `other`'s first block already
    /// points at this chain's tail.
    pub fn concatenate(&mut self, other: &BlockChain) -> &mut Self {
        let before = self.size();
        for block in other.chain.iter().skip(1) {
            self.append(block.clone());
        }
        info!(
            seam = before,
            appended = self.size() - before,
            size = self.size(),
            "concatenate chain"
        );
        self
    }
}

impl Default for BlockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Block> for BlockChain {
    fn extend<T: IntoIterator<Item = Block>>(&mut self, iter: T) {
        for block in iter {
            self.append(block);
        }
    }
}

impl<'a> IntoIterator for &'a BlockChain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for BlockChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.chain.iter().enumerate() {
            writeln!(f, "block {i}:")?;
            write!(f, "{block}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
