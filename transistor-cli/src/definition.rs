//! Flag-set definitions read from TOML.
//!
//! A definition names the set and lists its members in order. Members
//! without a `value` resolve by position; members with one resolve to it.
//!
//! ```toml
//! name = "Permission"
//!
//! [[flags]]
//! name = "Read"
//!
//! [[flags]]
//! name = "Write"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use transistor::{FlagRef, combine};

/// Error loading a flag-set definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("flag set '{0}' not found")]
    NotFound(String),

    #[error("flag set '{0}' declares no flags")]
    Empty(String),

    #[error("flag '{0}' is declared more than once")]
    Duplicate(String),

    #[error("flags must either all declare a value or none of them")]
    MixedValues,

    #[error("flag '{flag}': {reason}")]
    UnsupportedShape { flag: String, reason: String },

    #[error("positional flag sets support at most 64 flags, found {0}")]
    TooManyFlags(usize),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinition {
    name: String,
    #[serde(default)]
    flags: Vec<RawFlag>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFlag {
    name: String,
    value: Option<toml::Value>,
}

/// One named member of a flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    flag: FlagRef,
}

impl Member {
    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flag reference.
    pub fn flag(&self) -> FlagRef {
        self.flag
    }

    /// Resolved bit value.
    pub fn bits(&self) -> u64 {
        self.flag.resolve()
    }
}

/// A named, ordered set of flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    name: String,
    members: Vec<Member>,
}

impl FlagSet {
    /// Parses a definition.
    pub fn from_toml_str(s: &str) -> Result<Self, DefinitionError> {
        let raw: RawDefinition = toml::from_str(s)?;
        Self::from_raw(raw)
    }

    /// Loads a definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_toml_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            name = %set.name,
            flags = set.members.len(),
            "loaded flag set"
        );
        Ok(set)
    }

    /// Finds a definition by path, or by name inside `flags_dir`.
    ///
    /// `reference` is tried as a file path first, then as
    /// `<flags_dir>/<reference>.toml`.
    pub fn locate(reference: &str, flags_dir: &Path) -> Result<Self, DefinitionError> {
        let direct = Path::new(reference);
        if direct.is_file() {
            return Self::load(direct);
        }

        let named = flags_dir.join(format!("{reference}.toml"));
        if named.is_file() {
            return Self::load(named);
        }

        tracing::debug!(
            reference,
            flags_dir = %flags_dir.display(),
            "no definition found"
        );
        Err(DefinitionError::NotFound(reference.to_string()))
    }

    fn from_raw(raw: RawDefinition) -> Result<Self, DefinitionError> {
        if raw.flags.is_empty() {
            return Err(DefinitionError::Empty(raw.name));
        }

        let mut seen = HashSet::new();
        for flag in &raw.flags {
            if !seen.insert(flag.name.as_str()) {
                return Err(DefinitionError::Duplicate(flag.name.clone()));
            }
        }

        let backed = raw.flags.iter().filter(|f| f.value.is_some()).count();
        let members = if backed == 0 {
            if raw.flags.len() > 64 {
                return Err(DefinitionError::TooManyFlags(raw.flags.len()));
            }
            raw.flags
                .into_iter()
                .enumerate()
                .map(|(ordinal, flag)| Member {
                    name: flag.name,
                    flag: FlagRef::positional(ordinal as u32),
                })
                .collect()
        } else if backed == raw.flags.len() {
            raw.flags
                .into_iter()
                .map(|flag| {
                    let value = backing_value(&flag)?;
                    Ok(Member {
                        name: flag.name,
                        flag: FlagRef::backed(value),
                    })
                })
                .collect::<Result<Vec<_>, DefinitionError>>()?
        } else {
            return Err(DefinitionError::MixedValues);
        };

        Ok(Self {
            name: raw.name,
            members,
        })
    }

    /// Set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Combined value of every member.
    pub fn all_bits(&self) -> u64 {
        combine(self.members.iter().map(Member::flag))
    }
}

fn backing_value(flag: &RawFlag) -> Result<u64, DefinitionError> {
    let unsupported = |reason: String| DefinitionError::UnsupportedShape {
        flag: flag.name.clone(),
        reason,
    };
    match &flag.value {
        Some(toml::Value::Integer(value)) => u64::try_from(*value)
            .map_err(|_| unsupported(format!("value {value} must be non-negative"))),
        Some(other) => Err(unsupported(format!(
            "only integer values are supported, found {}",
            other.type_str()
        ))),
        None => Err(unsupported("missing value".to_string())),
    }
}
