use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreapError {
    #[error("split index {index} is out of range for a tree of length {len}")]
    SplitOutOfRange { index: usize, len: usize },
}

/// Rejected operation ranges. Bounds are the 1-based inclusive values as
/// received.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid range [{l}, {r}]: need 1 <= l <= r")]
    InvalidRange { l: usize, r: usize },
    #[error("range [{l}, {r}] exceeds sequence length {len}")]
    OutOfBounds { l: usize, r: usize, len: usize },
}
