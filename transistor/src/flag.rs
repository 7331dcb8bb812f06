//! Flag references and their resolution to bit values.

use crate::error::InvalidFlag;

/// A reference to one flag, or a composite of flags.
///
/// Resolution maps every form to a non-negative integer:
///
/// - [`Raw`](FlagRef::Raw) resolves to itself. Negative values are rejected.
/// - [`Positional`](FlagRef::Positional) resolves to `1 << ordinal`.
/// - [`Backed`](FlagRef::Backed) resolves to its declared value.
///
/// Enums deriving [`Flags`](crate::Flags) convert into `FlagRef`, as do the
/// primitive integers, so every operation accepts `impl Into<FlagRef>`.
///
/// # Example
///
/// ```
/// use transistor::FlagRef;
///
/// assert_eq!(FlagRef::positional(3).resolve(), 8);
/// assert_eq!(FlagRef::backed(0b110).resolve(), 6);
/// assert_eq!(FlagRef::from(4).resolve(), 4);
/// assert!(FlagRef::raw(-1).try_resolve().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagRef {
    /// Integer supplied directly by calling code.
    Raw(i64),
    /// Member of an enumeration without declared values.
    Positional {
        /// Zero-based declaration position.
        ordinal: u32,
    },
    /// Member of an enumeration with an explicit integer value.
    Backed(u64),
}

impl FlagRef {
    /// Raw integer flag.
    #[inline]
    pub const fn raw(value: i64) -> Self {
        FlagRef::Raw(value)
    }

    /// Flag at declaration position `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` >= 64.
    #[inline]
    pub const fn positional(ordinal: u32) -> Self {
        assert!(ordinal < u64::BITS, "flag position exceeds 64 bits");
        FlagRef::Positional { ordinal }
    }

    /// Flag with an explicit value.
    #[inline]
    pub const fn backed(value: u64) -> Self {
        FlagRef::Backed(value)
    }

    /// Resolve to the flag's bit value.
    #[inline]
    pub const fn try_resolve(self) -> Result<u64, InvalidFlag> {
        match self {
            FlagRef::Raw(value) if value < 0 => Err(InvalidFlag { value }),
            FlagRef::Raw(value) => Ok(value as u64),
            FlagRef::Positional { ordinal } => Ok(1 << ordinal),
            FlagRef::Backed(value) => Ok(value),
        }
    }

    /// Resolve to the flag's bit value.
    ///
    /// # Panics
    ///
    /// Panics on a negative raw value.
    #[inline]
    pub const fn resolve(self) -> u64 {
        match self.try_resolve() {
            Ok(bits) => bits,
            Err(_) => panic!("flag value must be non-negative"),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FlagRef {
                #[inline]
                fn from(value: $ty) -> Self {
                    FlagRef::Raw(value as i64)
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, i8, i16, i32, i64);

/// Unsigned 64-bit values cannot be negative, so they resolve as backed.
impl From<u64> for FlagRef {
    #[inline]
    fn from(value: u64) -> Self {
        FlagRef::Backed(value)
    }
}

impl From<usize> for FlagRef {
    #[inline]
    fn from(value: usize) -> Self {
        FlagRef::Backed(value as u64)
    }
}

/// Resolve any flag-like value.
///
/// # Panics
///
/// Panics on a negative raw value.
#[inline]
#[track_caller]
pub fn resolve(flag: impl Into<FlagRef>) -> u64 {
    flag.into().resolve()
}

/// Resolve any flag-like value, reporting negative raw values as errors.
#[inline]
pub fn try_resolve(flag: impl Into<FlagRef>) -> Result<u64, InvalidFlag> {
    flag.into().try_resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_is_shifted_ordinal() {
        assert_eq!(FlagRef::positional(0).resolve(), 1);
        assert_eq!(FlagRef::positional(1).resolve(), 2);
        assert_eq!(FlagRef::positional(2).resolve(), 4);
        assert_eq!(FlagRef::positional(3).resolve(), 8);
        assert_eq!(FlagRef::positional(63).resolve(), 1 << 63);
    }

    #[test]
    #[should_panic(expected = "flag position exceeds 64 bits")]
    fn positional_out_of_range_panics() {
        let _ = FlagRef::positional(64);
    }

    #[test]
    fn backed_is_identity() {
        assert_eq!(FlagRef::backed(0).resolve(), 0);
        assert_eq!(FlagRef::backed(0b1010).resolve(), 0b1010);
        assert_eq!(FlagRef::backed(u64::MAX).resolve(), u64::MAX);
    }

    #[test]
    fn raw_non_negative_is_identity() {
        assert_eq!(resolve(0), 0);
        assert_eq!(resolve(5u8), 5);
        assert_eq!(resolve(i64::MAX), i64::MAX as u64);
    }

    #[test]
    fn wide_unsigned_is_backed() {
        assert_eq!(FlagRef::from(u64::MAX), FlagRef::Backed(u64::MAX));
        assert_eq!(FlagRef::from(6usize), FlagRef::Backed(6));
        assert_eq!(resolve(1u64 << 63), 1 << 63);
    }

    #[test]
    fn raw_negative_is_error() {
        assert_eq!(try_resolve(-5), Err(InvalidFlag { value: -5 }));
        assert_eq!(
            FlagRef::raw(i64::MIN).try_resolve(),
            Err(InvalidFlag { value: i64::MIN })
        );
    }

    #[test]
    #[should_panic(expected = "flag value must be non-negative")]
    fn raw_negative_resolve_panics() {
        let _ = resolve(-1);
    }

    #[test]
    fn resolution_is_const() {
        const READ: u64 = FlagRef::positional(0).resolve();
        const ADMIN: u64 = FlagRef::backed(8).resolve();
        assert_eq!(READ | ADMIN, 9);
    }
}
