//! Generates flag enum sources.
//!
//! ```
//! use transistor_cli::generate::FlagEnum;
//!
//! let mut flags = FlagEnum::new("Permission").unwrap();
//! flags.push("read").unwrap();
//! flags.push("write-all").unwrap();
//!
//! let source = flags.render().unwrap();
//! assert!(source.contains("pub enum Permission {"));
//! assert!(source.contains("    WriteAll = 1 << 1,"));
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error generating a flag enum.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("enum name '{0}' must match [A-Z][a-zA-Z0-9]* and not be a reserved word")]
    InvalidName(String),

    #[error("'{0}' is not a valid flag name")]
    InvalidFlag(String),

    #[error("flag '{0}' already exists")]
    Duplicate(String),

    #[error("at least one flag is required")]
    NoFlags,

    #[error("too many flags: {0} exceeds 64")]
    TooManyFlags(usize),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    Exists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifiers that match the name pattern but cannot name an item.
const RESERVED: &[&str] = &["Self"];

/// Converts `some_flag`, `another-flag` or `third flag` to `SomeFlag`,
/// `AnotherFlag` and `ThirdFlag`.
///
/// Returns `None` if `input` holds anything besides ASCII letters, digits
/// and the `_`, `-` or whitespace separators.
pub fn studly(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    for word in input.split(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out.chars().all(|c| c.is_ascii_alphanumeric()).then_some(out)
}

/// Converts `ReadWrite` to `read_write` and `HTTPFlags` to `http_flags`.
pub fn snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if !prev.is_ascii_uppercase() || next_lower {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
        && !RESERVED.contains(&name)
}

/// Checks that `name` matches `^[A-Z][a-zA-Z0-9]*$` and is not reserved.
pub fn validate_name(name: &str) -> Result<(), GenerateError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(GenerateError::InvalidName(name.to_string()))
    }
}

/// An enum under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagEnum {
    name: String,
    flags: Vec<String>,
}

impl FlagEnum {
    /// Starts an enum with no flags.
    pub fn new(name: impl Into<String>) -> Result<Self, GenerateError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            flags: Vec::new(),
        })
    }

    /// Enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized flag names, in order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Normalizes `raw` and checks it could be added.
    pub fn check(&self, raw: &str) -> Result<String, GenerateError> {
        let flag = studly(raw)
            .filter(|flag| is_identifier(flag))
            .ok_or_else(|| GenerateError::InvalidFlag(raw.to_string()))?;
        if self.flags.contains(&flag) {
            return Err(GenerateError::Duplicate(flag));
        }
        if self.flags.len() == 64 {
            return Err(GenerateError::TooManyFlags(self.flags.len() + 1));
        }
        Ok(flag)
    }

    /// Normalizes and appends a flag, returning the normalized name.
    pub fn push(&mut self, raw: &str) -> Result<&str, GenerateError> {
        let flag = self.check(raw)?;
        self.flags.push(flag);
        Ok(self.flags.last().map_or("", String::as_str))
    }

    /// File name the enum is written to.
    pub fn file_name(&self) -> String {
        format!("{}.rs", snake(&self.name))
    }

    /// Renders the enum source.
    pub fn render(&self) -> Result<String, GenerateError> {
        if self.flags.is_empty() {
            return Err(GenerateError::NoFlags);
        }
        let repr = if self.flags.len() > 32 { "u64" } else { "u32" };

        let mut out = String::new();
        let _ = writeln!(out, "use transistor::Flags;");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "#[derive(Flags, Debug, Clone, Copy, PartialEq, Eq, Hash)]"
        );
        let _ = writeln!(out, "#[repr({repr})]");
        let _ = writeln!(out, "pub enum {} {{", self.name);
        for (shift, flag) in self.flags.iter().enumerate() {
            let _ = writeln!(out, "    {flag} = 1 << {shift},");
        }
        let _ = writeln!(out, "}}");
        Ok(out)
    }

    /// Writes the enum into `dir`, creating it if needed.
    ///
    /// An existing file is only replaced when `force` is set.
    pub fn write(&self, dir: &Path, force: bool) -> Result<PathBuf, GenerateError> {
        let source = self.render()?;
        let path = dir.join(self.file_name());
        if path.exists() && !force {
            return Err(GenerateError::Exists(path));
        }

        std::fs::create_dir_all(dir)?;
        std::fs::write(&path, source)?;
        tracing::info!(path = %path.display(), flags = self.flags.len(), "wrote flag enum");
        Ok(path)
    }
}
