use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("block index {index} out of range for chain of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, ChainError>;
