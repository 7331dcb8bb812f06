// transistor/src/error.rs

//! Error types for bitmask construction, flag resolution and validation.

use thiserror::Error;

/// Value exceeds the capacity of a bitmask width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} exceeds max {max}")]
pub struct Overflow {
    /// The value that was too large.
    pub value: u64,
    /// Maximum value the width can hold.
    pub max: u64,
}

/// A raw flag reference was negative.
///
/// Flags come from calling code, so this is a programming error rather than
/// bad data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid flag reference: {value} is negative")]
pub struct InvalidFlag {
    /// The offending raw value.
    pub value: i64,
}

/// Failure of a checked bitmask operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitmaskError {
    /// A flag could not be resolved.
    #[error(transparent)]
    InvalidFlag(#[from] InvalidFlag),
    /// The result does not fit the bitmask width.
    #[error(transparent)]
    Overflow(#[from] Overflow),
}

/// Value rejected by [`ValidBitmask`](crate::ValidBitmask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidBitmask {
    /// Input is not an integer.
    #[error("bitmask must be an integer")]
    NotAnInteger,
    /// Input is below zero.
    #[error("bitmask must be non-negative, got {0}")]
    Negative(i64),
    /// Input has bits outside the combined range of the flag set.
    #[error("bitmask {value} exceeds flag range {max}")]
    ExceedsFlags {
        /// The rejected value.
        value: u64,
        /// Combined value of every flag in the set.
        max: u64,
    },
}
