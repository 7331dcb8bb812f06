//! Command-line tooling for transistor flag sets.
//!
//! - [`config`]: `transistor.toml` loading
//! - [`definition`]: flag-set definitions read from TOML
//! - [`inspect`]: the `inspect` table
//! - [`generate`]: the `make-flags` enum generator

pub mod config;
pub mod definition;
pub mod generate;
pub mod inspect;

pub use config::{ConfigError, TransistorConfig};
pub use definition::{DefinitionError, FlagSet, Member};
pub use generate::{FlagEnum, GenerateError};
pub use inspect::{InspectError, InspectTable};
