//! Supported bitmask widths.

use core::fmt;

/// Number of bits a [`Bitmask`](crate::Bitmask) may occupy.
///
/// Widths mirror unsigned integer column sizes: tiny (8), small (16),
/// medium (24) and regular (32).
///
/// # Example
///
/// ```
/// use transistor::BitWidth;
///
/// assert_eq!(BitWidth::Tiny.max(), 255);
/// assert_eq!(BitWidth::Medium.bits(), 24);
/// assert_eq!(BitWidth::default(), BitWidth::Regular);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum BitWidth {
    /// 8 bits, max 255.
    Tiny = 8,
    /// 16 bits, max 65535.
    Small = 16,
    /// 24 bits, max 16777215.
    Medium = 24,
    /// 32 bits, max 4294967295.
    #[default]
    Regular = 32,
}

impl BitWidth {
    /// Every width, narrowest first.
    pub const ALL: [BitWidth; 4] = [
        BitWidth::Tiny,
        BitWidth::Small,
        BitWidth::Medium,
        BitWidth::Regular,
    ];

    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Maximum value this width can hold.
    #[inline]
    pub const fn max(self) -> u32 {
        match self {
            BitWidth::Tiny => 0xFF,
            BitWidth::Small => 0xFFFF,
            BitWidth::Medium => 0xFF_FFFF,
            BitWidth::Regular => u32::MAX,
        }
    }

    /// Returns true if `value` fits without losing bits.
    #[inline]
    pub const fn fits(self, value: u64) -> bool {
        value <= self.max() as u64
    }

    /// Width with exactly `bits` bits, if supported.
    #[inline]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(BitWidth::Tiny),
            16 => Some(BitWidth::Small),
            24 => Some(BitWidth::Medium),
            32 => Some(BitWidth::Regular),
            _ => None,
        }
    }

    /// Narrowest width that can hold `value`.
    #[inline]
    pub const fn smallest_for(value: u64) -> Option<Self> {
        let mut i = 0;
        while i < Self::ALL.len() {
            if Self::ALL[i].fits(value) {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }
        None
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
