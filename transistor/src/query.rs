//! In-memory query scopes over records with bitmask columns.
//!
//! # Example
//!
//! ```
//! use transistor::{BitmaskColumns, Flags, Query};
//!
//! #[derive(Flags, Clone, Copy, Debug, PartialEq, Eq)]
//! enum Permission {
//!     Read,
//!     Write,
//!     Delete,
//!     Admin,
//! }
//!
//! struct User {
//!     permissions: Option<u32>,
//! }
//!
//! impl BitmaskColumns for User {
//!     fn bitmask_column(&self, column: &str) -> Option<u64> {
//!         match column {
//!             "permissions" => self.permissions.map(u64::from),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let users = [1, 3, 8, 9, 0].map(|p| User { permissions: Some(p) });
//!
//! let readers_not_admins = Query::new()
//!     .where_has_flag("permissions", Permission::Read)
//!     .where_doesnt_have_flag("permissions", Permission::Admin);
//!
//! assert_eq!(readers_not_admins.filter(&users).count(), 2);
//! ```

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::flag::FlagRef;
use crate::predicate::{self, Condition};

/// Read access to a record's bitmask columns.
pub trait BitmaskColumns {
    /// Stored value of `column`, or `None` when the column is null or unknown.
    fn bitmask_column(&self, column: &str) -> Option<u64>;
}

impl<T: BitmaskColumns + ?Sized> BitmaskColumns for &T {
    #[inline]
    fn bitmask_column(&self, column: &str) -> Option<u64> {
        (**self).bitmask_column(column)
    }
}

/// One condition on one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    column: Cow<'static, str>,
    condition: Condition,
}

impl Clause {
    /// Clause testing `column` against `condition`.
    pub fn new(column: impl Into<Cow<'static, str>>, condition: Condition) -> Self {
        Self {
            column: column.into(),
            condition,
        }
    }

    /// Column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Condition on the column.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// A null column never matches.
    pub fn matches<R: BitmaskColumns + ?Sized>(&self, record: &R) -> bool {
        record
            .bitmask_column(&self.column)
            .is_some_and(|stored| self.condition.matches(stored))
    }
}

/// Conjunction of clauses, built by chaining scopes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// Query matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary clause.
    pub fn where_condition(
        mut self,
        column: impl Into<Cow<'static, str>>,
        condition: Condition,
    ) -> Self {
        self.clauses.push(Clause::new(column, condition));
        self
    }

    /// Records where `column` has every bit of `flag`.
    #[track_caller]
    pub fn where_has_flag(
        self,
        column: impl Into<Cow<'static, str>>,
        flag: impl Into<FlagRef>,
    ) -> Self {
        self.where_condition(column, predicate::has_flag(flag))
    }

    /// Records where `column` has every flag.
    #[track_caller]
    pub fn where_has_all_flags<I>(self, column: impl Into<Cow<'static, str>>, flags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        self.where_condition(column, predicate::has_all(flags))
    }

    /// Records where `column` has at least one of the flags.
    #[track_caller]
    pub fn where_has_any_flag<I>(self, column: impl Into<Cow<'static, str>>, flags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        self.where_condition(column, predicate::has_any(flags))
    }

    /// Records where `column` lacks `flag`.
    #[track_caller]
    pub fn where_doesnt_have_flag(
        self,
        column: impl Into<Cow<'static, str>>,
        flag: impl Into<FlagRef>,
    ) -> Self {
        self.where_condition(column, predicate::lacks_flag(flag))
    }

    /// Records where `column` has none of the flags.
    #[track_caller]
    pub fn where_doesnt_have_any_flag<I>(
        self,
        column: impl Into<Cow<'static, str>>,
        flags: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FlagRef>,
    {
        self.where_condition(column, predicate::has_none(flags))
    }

    /// Clauses in insertion order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if `record` satisfies every clause.
    pub fn matches<R: BitmaskColumns + ?Sized>(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// Matching records, lazily and in order.
    pub fn filter<I>(&self, records: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: BitmaskColumns,
    {
        records
            .into_iter()
            .filter(move |record| self.matches(record))
    }
}
