//! Error type shared by the positional containers and policy validation.
//!
//! Key-addressed map operations never fail; a missing key is reported with
//! `None`. Only index-addressed access, zero-sized bitsets and invalid
//! resize policies produce a `ContainerError`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Positional access outside `0..len` (or `0..=len` for inserts).
    #[error("index out of bounds: index {index}, len {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("size must be a positive integer")]
    ZeroSize,

    #[error("invalid resize policy: {reason}")]
    InvalidPolicy { reason: &'static str },
}

pub type Result<T> = core::result::Result<T, ContainerError>;

impl ContainerError {
    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        ContainerError::IndexOutOfBounds { index, len }
    }
}
