//! Conversion between stored scalar columns and [`Bitmask`] values.

use crate::bitmask::Bitmask;
use crate::error::Overflow;
use crate::width::BitWidth;

/// Maps a nullable integer column to bitmasks of one width.
///
/// Nulls pass through untouched in both directions.
///
/// # Example
///
/// ```
/// use transistor::{BitWidth, BitmaskCast};
///
/// let cast = BitmaskCast::new(BitWidth::Tiny);
///
/// let mask = cast.get(Some(127)).unwrap().unwrap();
/// assert_eq!(mask.size(), BitWidth::Tiny);
/// assert_eq!(cast.set(Some(mask.set(128))), Some(255));
///
/// assert_eq!(cast.get(None), Ok(None));
/// assert!(cast.get(Some(300)).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitmaskCast {
    width: BitWidth,
}

impl BitmaskCast {
    /// Cast for columns of `width`.
    #[inline]
    pub const fn new(width: BitWidth) -> Self {
        Self { width }
    }

    /// Width of the bitmasks produced.
    #[inline]
    pub const fn width(self) -> BitWidth {
        self.width
    }

    /// Stored value to bitmask.
    ///
    /// Negative values clamp to zero. Returns error if the value exceeds the
    /// width.
    #[inline]
    pub const fn get(self, stored: Option<i64>) -> Result<Option<Bitmask>, Overflow> {
        match stored {
            None => Ok(None),
            Some(value) => match Bitmask::new(value, self.width) {
                Ok(mask) => Ok(Some(mask)),
                Err(err) => Err(err),
            },
        }
    }

    /// Bitmask to stored value.
    #[inline]
    pub const fn set(self, mask: Option<Bitmask>) -> Option<i64> {
        match mask {
            None => None,
            Some(mask) => Some(mask.value() as i64),
        }
    }

    /// Raw integer to stored value, unchanged.
    #[inline]
    pub const fn set_raw(self, value: Option<i64>) -> Option<i64> {
        value
    }
}
