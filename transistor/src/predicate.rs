//! Combined masks and named flag predicates.
//!
//! A [`Condition`] pairs a [`Predicate`] with the mask it tests. Evaluators
//! that cannot call [`Condition::matches`] directly (a database, a remote
//! filter) read the [`Relation`] instead: compute `stored & mask`, then
//! compare it to [`Relation::operand`] with [`Relation::comparison`].

use core::fmt;

use crate::error::InvalidFlag;
use crate::flag::FlagRef;

/// Bitwise OR of every resolved flag. No flags combine to 0.
///
/// # Panics
///
/// Panics if any flag is a negative raw value.
#[track_caller]
pub fn combine<I>(flags: I) -> u64
where
    I: IntoIterator,
    I::Item: Into<FlagRef>,
{
    match try_combine(flags) {
        Ok(mask) => mask,
        Err(_) => panic!("flag value must be non-negative"),
    }
}

/// Bitwise OR of every resolved flag, stopping at the first invalid one.
pub fn try_combine<I>(flags: I) -> Result<u64, InvalidFlag>
where
    I: IntoIterator,
    I::Item: Into<FlagRef>,
{
    flags
        .into_iter()
        .try_fold(0u64, |acc, flag| -> Result<u64, InvalidFlag> {
            Ok(acc | flag.into().try_resolve()?)
        })
}

/// Named relation between a stored integer and a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Every bit of a single flag is set.
    HasFlag,
    /// Every bit of the combined flags is set.
    HasAll,
    /// At least one bit of the combined flags is set.
    HasAny,
    /// No bit of the combined flags is set.
    HasNone,
    /// Not every bit of a single flag is set.
    LacksFlag,
}

impl Predicate {
    /// Relation evaluators apply to `stored & mask`.
    #[inline]
    pub const fn relation(self) -> Relation {
        match self {
            Predicate::HasFlag | Predicate::HasAll => Relation::EqMask,
            Predicate::HasAny => Relation::NeZero,
            Predicate::HasNone => Relation::EqZero,
            Predicate::LacksFlag => Relation::NeMask,
        }
    }

    /// Kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Predicate::HasFlag => "has-flag",
            Predicate::HasAll => "has-all",
            Predicate::HasAny => "has-any",
            Predicate::HasNone => "has-none",
            Predicate::LacksFlag => "lacks-flag",
        }
    }

    /// Evaluate against a stored value.
    #[inline]
    pub const fn test(self, stored: u64, mask: u64) -> bool {
        self.relation().test(stored & mask, mask)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison of `stored & mask` against the mask or zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `stored & mask == mask`
    EqMask,
    /// `stored & mask != mask`
    NeMask,
    /// `stored & mask == 0`
    EqZero,
    /// `stored & mask != 0`
    NeZero,
}

/// Equality operator of a [`Relation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Equal, written `=`.
    Eq,
    /// Not equal, written `!=`.
    Ne,
}

impl Comparison {
    /// Operator symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
        }
    }
}

impl Relation {
    /// Operator to apply.
    #[inline]
    pub const fn comparison(self) -> Comparison {
        match self {
            Relation::EqMask | Relation::EqZero => Comparison::Eq,
            Relation::NeMask | Relation::NeZero => Comparison::Ne,
        }
    }

    /// Right-hand side of the comparison.
    #[inline]
    pub const fn operand(self, mask: u64) -> u64 {
        match self {
            Relation::EqMask | Relation::NeMask => mask,
            Relation::EqZero | Relation::NeZero => 0,
        }
    }

    /// Evaluate against an already-masked value.
    #[inline]
    pub const fn test(self, masked: u64, mask: u64) -> bool {
        let operand = self.operand(mask);
        match self.comparison() {
            Comparison::Eq => masked == operand,
            Comparison::Ne => masked != operand,
        }
    }
}

/// A predicate bound to its combined mask.
///
/// # Example
///
/// ```
/// use transistor::{has_any, has_flag, has_none, Relation};
///
/// const READ: u32 = 1;
/// const WRITE: u32 = 2;
/// const DELETE: u32 = 4;
/// const ADMIN: u32 = 8;
///
/// let stored = 0b0101;
/// assert!(has_flag(READ).matches(stored));
/// assert!(!has_any([WRITE, ADMIN]).matches(stored));
/// assert!(has_any([READ, DELETE]).matches(stored));
/// assert!(has_none([WRITE, ADMIN]).matches(stored));
///
/// let cond = has_any([WRITE, ADMIN]);
/// assert_eq!(cond.mask(), 10);
/// assert_eq!(cond.relation(), Relation::NeZero);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    predicate: Predicate,
    mask: u64,
}

impl Condition {
    /// Condition from a predicate and a precombined mask.
    #[inline]
    pub const fn new(predicate: Predicate, mask: u64) -> Self {
        Self { predicate, mask }
    }

    /// The predicate.
    #[inline]
    pub const fn predicate(self) -> Predicate {
        self.predicate
    }

    /// Combined mask.
    #[inline]
    pub const fn mask(self) -> u64 {
        self.mask
    }

    /// Relation to apply to `stored & mask`.
    #[inline]
    pub const fn relation(self) -> Relation {
        self.predicate.relation()
    }

    /// Returns true if `stored` satisfies the condition.
    #[inline]
    pub const fn matches(self, stored: u64) -> bool {
        self.predicate.test(stored, self.mask)
    }

    /// Condition holding for exactly the values this one rejects.
    pub const fn negate(self) -> Self {
        let predicate = match self.predicate {
            Predicate::HasFlag | Predicate::HasAll => Predicate::LacksFlag,
            Predicate::LacksFlag => Predicate::HasAll,
            Predicate::HasAny => Predicate::HasNone,
            Predicate::HasNone => Predicate::HasAny,
        };
        Self {
            predicate,
            mask: self.mask,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = self.relation();
        write!(
            f,
            "value & {} {} {}",
            self.mask,
            relation.comparison().symbol(),
            relation.operand(self.mask)
        )
    }
}

/// Every bit of `flag` is set.
#[track_caller]
pub fn has_flag(flag: impl Into<FlagRef>) -> Condition {
    Condition::new(Predicate::HasFlag, flag.into().resolve())
}

/// Every bit of every flag is set. Vacuously true for no flags.
#[track_caller]
pub fn has_all<I>(flags: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<FlagRef>,
{
    Condition::new(Predicate::HasAll, combine(flags))
}

/// At least one bit of the flags is set. Always false for no flags.
#[track_caller]
pub fn has_any<I>(flags: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<FlagRef>,
{
    Condition::new(Predicate::HasAny, combine(flags))
}

/// No bit of the flags is set. Always true for no flags.
#[track_caller]
pub fn has_none<I>(flags: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<FlagRef>,
{
    Condition::new(Predicate::HasNone, combine(flags))
}

/// Not every bit of `flag` is set.
#[track_caller]
pub fn lacks_flag(flag: impl Into<FlagRef>) -> Condition {
    Condition::new(Predicate::LacksFlag, flag.into().resolve())
}
