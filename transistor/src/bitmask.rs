//! Width-constrained bitmask values.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::{BitmaskError, Overflow};
use crate::flag::FlagRef;
use crate::flags::Flags;
use crate::predicate::try_combine;
use crate::width::BitWidth;

/// An immutable set of flags packed into an unsigned integer of fixed width.
///
/// Construction clamps negative input to zero and rejects input above the
/// width's maximum. Every operation returns a new value.
///
/// Equality, ordering and hashing look only at the stored value; the width
/// bounds what can be stored but is not compared.
///
/// # Example
///
/// ```
/// use transistor::{BitWidth, Bitmask};
///
/// const READ: u32 = 1;
/// const WRITE: u32 = 2;
/// const DELETE: u32 = 4;
///
/// let mask = Bitmask::tiny(0).unwrap().set(READ).set(DELETE);
/// assert_eq!(mask.value(), 5);
/// assert_eq!(mask.size(), BitWidth::Tiny);
/// assert!(mask.has(READ));
/// assert!(!mask.has(WRITE));
///
/// let mask = mask.clear(READ);
/// assert_eq!(mask.value(), 4);
///
/// assert!(Bitmask::tiny(300).is_err());
/// assert_eq!(Bitmask::make(-5).unwrap().value(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Bitmask {
    width: BitWidth,
    value: u32,
}

impl Bitmask {
    /// Creates a bitmask of the given width.
    ///
    /// Negative values clamp to zero. Returns error if `value` exceeds
    /// `width.max()`.
    #[inline]
    pub const fn new(value: i64, width: BitWidth) -> Result<Self, Overflow> {
        if value < 0 {
            return Ok(Self::empty(width));
        }
        let value = value as u64;
        if !width.fits(value) {
            return Err(Overflow {
                value,
                max: width.max() as u64,
            });
        }
        Ok(Self {
            width,
            value: value as u32,
        })
    }

    /// Empty bitmask of the given width.
    #[inline]
    pub const fn empty(width: BitWidth) -> Self {
        Self { width, value: 0 }
    }

    /// 32-bit bitmask.
    #[inline]
    pub const fn make(value: i64) -> Result<Self, Overflow> {
        Self::new(value, BitWidth::Regular)
    }

    /// 8-bit bitmask.
    #[inline]
    pub const fn tiny(value: i64) -> Result<Self, Overflow> {
        Self::new(value, BitWidth::Tiny)
    }

    /// 16-bit bitmask.
    #[inline]
    pub const fn small(value: i64) -> Result<Self, Overflow> {
        Self::new(value, BitWidth::Small)
    }

    /// 24-bit bitmask.
    #[inline]
    pub const fn medium(value: i64) -> Result<Self, Overflow> {
        Self::new(value, BitWidth::Medium)
    }

    /// Raw stored value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Declared width.
    #[inline]
    pub const fn size(self) -> BitWidth {
        self.width
    }

    /// Returns true if no bit is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.value == 0
    }

    /// Same value at another width.
    ///
    /// Returns error if the value does not fit `width`.
    #[inline]
    pub const fn with_width(self, width: BitWidth) -> Result<Self, Overflow> {
        Self::new(self.value as i64, width)
    }

    /// Set every bit of `flag`.
    ///
    /// # Panics
    ///
    /// Panics if `flag` is a negative raw value or the result exceeds the width.
    #[inline]
    #[track_caller]
    pub fn set(self, flag: impl Into<FlagRef>) -> Self {
        unwrap_op(self.try_set(flag))
    }

    /// Set every bit of `flag`.
    ///
    /// Returns error if `flag` is a negative raw value or the result exceeds
    /// the width.
    #[inline]
    pub fn try_set(self, flag: impl Into<FlagRef>) -> Result<Self, BitmaskError> {
        let bits = flag.into().try_resolve()?;
        self.store(self.value as u64 | bits)
    }

    /// Clear every bit of `flag`.
    ///
    /// # Panics
    ///
    /// Panics if `flag` is a negative raw value.
    #[inline]
    #[track_caller]
    pub fn clear(self, flag: impl Into<FlagRef>) -> Self {
        unwrap_op(self.try_clear(flag))
    }

    /// Clear every bit of `flag`.
    #[inline]
    pub fn try_clear(self, flag: impl Into<FlagRef>) -> Result<Self, BitmaskError> {
        let bits = flag.into().try_resolve()?;
        Ok(Self {
            width: self.width,
            value: (self.value as u64 & !bits) as u32,
        })
    }

    /// Flip every bit of `flag`.
    ///
    /// # Panics
    ///
    /// Panics if `flag` is a negative raw value or the result exceeds the width.
    #[inline]
    #[track_caller]
    pub fn toggle(self, flag: impl Into<FlagRef>) -> Self {
        unwrap_op(self.try_toggle(flag))
    }

    /// Flip every bit of `flag`.
    #[inline]
    pub fn try_toggle(self, flag: impl Into<FlagRef>) -> Result<Self, BitmaskError> {
        let bits = flag.into().try_resolve()?;
        self.store(self.value as u64 ^ bits)
    }

    /// Set or clear `flag` depending on `enabled`.
    ///
    /// # Panics
    ///
    /// Same as [`set`](Self::set) and [`clear`](Self::clear).
    #[inline]
    #[track_caller]
    pub fn set_to(self, flag: impl Into<FlagRef>, enabled: bool) -> Self {
        if enabled {
            self.set(flag)
        } else {
            self.clear(flag)
        }
    }

    /// Returns true if every bit of `flag` is set.
    ///
    /// # Panics
    ///
    /// Panics if `flag` is a negative raw value.
    #[inline]
    #[track_caller]
    pub fn has(self, flag: impl Into<FlagRef>) -> bool {
        unwrap_op(self.try_has(flag))
    }

    /// Returns true if every bit of `flag` is set.
    #[inline]
    pub fn try_has(self, flag: impl Into<FlagRef>) -> Result<bool, BitmaskError> {
        let bits = flag.into().try_resolve()?;
        Ok(self.value as u64 & bits == bits)
    }

    /// Returns true if every flag is set. Vacuously true for no flags.
    #[track_caller]
    pub fn has_all<I>(self, flags: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        let mask = unwrap_op(try_combine(flags).map_err(BitmaskError::from));
        self.value as u64 & mask == mask
    }

    /// Returns true if at least one bit of any flag is set.
    #[track_caller]
    pub fn has_any<I>(self, flags: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        let mask = unwrap_op(try_combine(flags).map_err(BitmaskError::from));
        self.value as u64 & mask != 0
    }

    /// Returns true if no bit of any flag is set.
    #[track_caller]
    pub fn has_none<I>(self, flags: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        !self.has_any(flags)
    }

    /// Members of `F` that are set, in declaration order.
    pub fn flags<F: Flags>(self) -> impl Iterator<Item = F> {
        F::ALL
            .iter()
            .copied()
            .filter(move |flag| self.value as u64 & flag.bits() == flag.bits())
    }

    fn store(self, value: u64) -> Result<Self, BitmaskError> {
        if !self.width.fits(value) {
            return Err(Overflow {
                value,
                max: self.width.max() as u64,
            }
            .into());
        }
        Ok(Self {
            width: self.width,
            value: value as u32,
        })
    }
}

#[track_caller]
fn unwrap_op<T>(result: Result<T, BitmaskError>) -> T {
    match result {
        Ok(value) => value,
        Err(BitmaskError::InvalidFlag(_)) => panic!("flag value must be non-negative"),
        Err(BitmaskError::Overflow(err)) => panic!("bitmask overflow: {err}"),
    }
}

impl PartialEq for Bitmask {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Bitmask {}

impl PartialOrd for Bitmask {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bitmask {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Bitmask {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<Bitmask> for u32 {
    #[inline]
    fn from(mask: Bitmask) -> Self {
        mask.value
    }
}

impl From<Bitmask> for u64 {
    #[inline]
    fn from(mask: Bitmask) -> Self {
        mask.value as u64
    }
}

impl From<Bitmask> for i64 {
    #[inline]
    fn from(mask: Bitmask) -> Self {
        mask.value as i64
    }
}

/// A bitmask used as a flag stands for all of its set bits.
impl From<Bitmask> for FlagRef {
    #[inline]
    fn from(mask: Bitmask) -> Self {
        FlagRef::Backed(mask.value as u64)
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Binary digits zero-padded to the width.
impl fmt::Binary for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.width.bits() as usize;
        if f.alternate() {
            write!(f, "{:#0w$b}", self.value, w = bits + 2)
        } else {
            write!(f, "{:0w$b}", self.value, w = bits)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bitmask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value)
    }
}

/// Deserializes a 32-bit bitmask from an integer.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Bitmask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Bitmask::make(raw).map_err(serde::de::Error::custom)
    }
}
