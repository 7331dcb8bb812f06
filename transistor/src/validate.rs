//! Validation of untrusted bitmask input.

use crate::error::InvalidBitmask;
use crate::flags::Flags;

/// Rule accepting non-negative integers, optionally bounded by a flag set.
///
/// With a flag set, the value may not exceed the combined value of all its
/// members.
///
/// # Example
///
/// ```
/// use transistor::{Flags, InvalidBitmask, ValidBitmask};
///
/// #[derive(Flags, Clone, Copy, Debug, PartialEq, Eq)]
/// enum Permission {
///     Read,
///     Write,
///     Delete,
///     Admin,
/// }
///
/// let rule = ValidBitmask::for_flags::<Permission>();
/// assert_eq!(rule.check(15), Ok(15));
/// assert_eq!(rule.check(16), Err(InvalidBitmask::ExceedsFlags { value: 16, max: 15 }));
/// assert!(rule.passes_str("7"));
/// assert!(!rule.passes_str("seven"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidBitmask {
    max: Option<u64>,
}

impl ValidBitmask {
    /// Rule accepting any non-negative integer.
    #[inline]
    pub const fn new() -> Self {
        Self { max: None }
    }

    /// Rule bounded by the combined value of `F`.
    pub fn for_flags<F: Flags>() -> Self {
        Self::with_max(F::all_bits())
    }

    /// Rule bounded by `max`.
    #[inline]
    pub const fn with_max(max: u64) -> Self {
        Self { max: Some(max) }
    }

    /// Upper bound, if any.
    #[inline]
    pub const fn max(self) -> Option<u64> {
        self.max
    }

    /// Check an integer.
    pub const fn check(self, value: i64) -> Result<u64, InvalidBitmask> {
        if value < 0 {
            return Err(InvalidBitmask::Negative(value));
        }
        let value = value as u64;
        match self.max {
            Some(max) if value > max => Err(InvalidBitmask::ExceedsFlags { value, max }),
            _ => Ok(value),
        }
    }

    /// Check decimal text. Surrounding whitespace is ignored.
    pub fn check_str(self, input: &str) -> Result<u64, InvalidBitmask> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidBitmask::NotAnInteger)?;
        self.check(value)
    }

    /// Returns true if `value` is valid.
    #[inline]
    pub const fn passes(self, value: i64) -> bool {
        self.check(value).is_ok()
    }

    /// Returns true if `input` is valid.
    #[inline]
    pub fn passes_str(self, input: &str) -> bool {
        self.check_str(input).is_ok()
    }
}
