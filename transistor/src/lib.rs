//! Sized bitmask values and flag predicates.
//!
//! `transistor` packs a set of named boolean flags into an unsigned integer
//! of fixed width (8, 16, 24 or 32 bits), and builds the masks and
//! predicates needed to filter records by those flags.
//!
//! # Example
//!
//! ```
//! use transistor::{Bitmask, Flags, has_all, has_any, has_none};
//!
//! #[derive(Flags, Clone, Copy, Debug, PartialEq, Eq)]
//! enum Permission {
//!     Read,   // 1
//!     Write,  // 2
//!     Delete, // 4
//!     Admin,  // 8
//! }
//!
//! let perms = Bitmask::make(0)
//!     .unwrap()
//!     .set(Permission::Read)
//!     .set(Permission::Delete);
//!
//! assert_eq!(perms.value(), 5);
//! assert!(perms.has(Permission::Read));
//! assert!(!perms.has(Permission::Write));
//!
//! // Predicates over a stored integer
//! let stored = u64::from(perms);
//! assert!(!has_all([Permission::Read, Permission::Write]).matches(stored));
//! assert!(has_any([Permission::Read, Permission::Delete]).matches(stored));
//! assert!(has_none([Permission::Write, Permission::Admin]).matches(stored));
//!
//! let set: Vec<Permission> = perms.flags().collect();
//! assert_eq!(set, [Permission::Read, Permission::Delete]);
//! ```
//!
//! # Width overflow
//!
//! Every construction path rejects values above the width's maximum with
//! [`Overflow`]; negative values clamp to zero.
//!
//! ```
//! use transistor::{Bitmask, Overflow};
//!
//! assert_eq!(Bitmask::tiny(255).unwrap().value(), 255);
//! assert_eq!(Bitmask::tiny(300), Err(Overflow { value: 300, max: 255 }));
//! assert_eq!(Bitmask::make(-5).unwrap().value(), 0);
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod bitmask;
mod cast;
mod error;
mod flag;
mod flags;
mod predicate;
mod query;
mod validate;
mod width;

pub use bitmask::Bitmask;
pub use cast::BitmaskCast;
pub use error::{BitmaskError, InvalidBitmask, InvalidFlag, Overflow};
pub use flag::{FlagRef, resolve, try_resolve};
pub use flags::Flags;
pub use predicate::{
    Comparison, Condition, Predicate, Relation, combine, has_all, has_any, has_flag, has_none,
    lacks_flag, try_combine,
};
pub use query::{BitmaskColumns, Clause, Query};
pub use validate::ValidBitmask;
pub use width::BitWidth;

#[cfg(feature = "derive")]
pub use transistor_derive::Flags;
