//! Errors raised while constructing a session.
//!
//! Anything that can go wrong after construction is either ignored input or an
//! invariant violation, and the latter panics.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("win value must be a power of two of at least 4, got {0}")]
    InvalidWinValue(u32),

    #[error("invalid tile layout: {0}")]
    InvalidLayout(String),
}
