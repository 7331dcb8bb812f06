//! Tabular view of a flag set and, optionally, a stored value.

use std::fmt::Write as _;

use colored::Colorize;
use thiserror::Error;
use transistor::ValidBitmask;

use crate::definition::FlagSet;

/// Error preparing an inspection.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("value must be a non-negative integer")]
    InvalidValue,
}

/// Parses the value argument of `inspect`.
///
/// Anything that is not a non-negative integer is rejected, including
/// values that exceed the flags of the set being inspected.
pub fn parse_value(input: &str) -> Result<u64, InspectError> {
    ValidBitmask::new()
        .check_str(input)
        .map_err(|_| InspectError::InvalidValue)
}

struct Row {
    label: String,
    value: u64,
}

/// Rows of `Case | Decimal | Binary`, one per member plus an optional
/// `Value` row.
pub struct InspectTable {
    rows: Vec<Row>,
    value: Option<Row>,
    bits: u32,
}

impl InspectTable {
    /// Builds the table for `set`, appending `value` if given.
    pub fn new(set: &FlagSet, value: Option<u64>) -> Self {
        let rows: Vec<Row> = set
            .members()
            .iter()
            .map(|member| Row {
                label: member.name().to_string(),
                value: member.bits(),
            })
            .collect();
        let value = value.map(|value| Row {
            label: "Value".to_string(),
            value,
        });

        let highest = rows
            .iter()
            .chain(value.iter())
            .map(|row| row.value)
            .max()
            .unwrap_or(0);
        let bits = (u64::BITS - highest.leading_zeros()).max(8);

        Self { rows, value, bits }
    }

    /// Number of binary digits shown per row.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Renders the table, colouring set bits green and clear bits gray.
    pub fn render(&self, color: bool) -> String {
        let label_width = self
            .rows
            .iter()
            .chain(self.value.iter())
            .map(|row| row.label.len())
            .chain(["Case".len()])
            .max()
            .unwrap_or(0);
        let decimal_width = self
            .rows
            .iter()
            .chain(self.value.iter())
            .map(|row| row.value.to_string().len())
            .chain(["Decimal".len()])
            .max()
            .unwrap_or(0);
        // Digits plus the spaces between them.
        let binary_width = (self.bits as usize * 2 - 1).max("Binary".len());

        let border = format!(
            "+-{}-+-{}-+-{}-+",
            "-".repeat(label_width),
            "-".repeat(decimal_width),
            "-".repeat(binary_width),
        );

        let mut out = String::new();
        let _ = writeln!(out, "{border}");
        let _ = writeln!(
            out,
            "| {:<label_width$} | {:<decimal_width$} | {:<binary_width$} |",
            "Case", "Decimal", "Binary"
        );
        let _ = writeln!(out, "{border}");

        let line = |row: &Row| {
            let plain = binary(row.value, self.bits);
            let padding = " ".repeat(binary_width - plain.len());
            let shown = if color { colorize(&plain) } else { plain };
            format!(
                "| {:<label_width$} | {:<decimal_width$} | {shown}{padding} |\n",
                row.label, row.value
            )
        };

        for row in &self.rows {
            out.push_str(&line(row));
        }
        if let Some(value) = &self.value {
            let _ = writeln!(out, "{border}");
            out.push_str(&line(value));
        }
        let _ = writeln!(out, "{border}");
        out
    }
}

/// Formats `value` as `bits` space-separated binary digits, most
/// significant first.
pub fn binary(value: u64, bits: u32) -> String {
    let digits = format!("{value:0width$b}", width = bits as usize);
    let mut out = String::with_capacity(digits.len() * 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out
}

fn colorize(plain: &str) -> String {
    plain
        .split(' ')
        .map(|digit| match digit {
            "1" => digit.green().to_string(),
            _ => digit.bright_black().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_pads_and_spaces() {
        assert_eq!(binary(5, 8), "0 0 0 0 0 1 0 1");
        assert_eq!(binary(0, 8), "0 0 0 0 0 0 0 0");
        assert_eq!(binary(256, 9), "1 0 0 0 0 0 0 0 0");
    }

    #[test]
    fn parse_value_rejects_garbage() {
        assert_eq!(parse_value("11").unwrap(), 11);
        assert_eq!(parse_value(" 0 ").unwrap(), 0);
        assert!(parse_value("-1").is_err());
        assert!(parse_value("abc").is_err());
        assert!(parse_value("1.5").is_err());
        assert_eq!(
            parse_value("x").unwrap_err().to_string(),
            "value must be a non-negative integer"
        );
    }
}
