//! Saved-config text: a seed line followed by the true rule entries.
//!
//! ```text
//! Seed:
//! 0110...
//!
//! Moore Rules:
//! Faces: 0   Edges: 3   Corners: 1
//!
//! VN Rules:
//! Faces: 2
//!
//! ```
//!
//! Files are appended to, so one file may hold many records.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::automaton::rules::{
    MooreTable, RuleTable, VonNeumannTable, MAX_CORNERS, MAX_EDGES, MAX_FACES,
};
use crate::error::GrowthError;

/// One parsed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedConfig {
    pub seed: Vec<u8>,
    /// `(faces, edges, corners)` of every true Moore entry.
    pub moore: Vec<(u8, u8, u8)>,
    /// Face counts of every true Von Neumann entry.
    pub von_neumann: Vec<u8>,
}

impl SavedConfig {
    pub fn to_rule_table(&self) -> RuleTable {
        let mut moore = MooreTable::empty();
        for &(f, e, c) in &self.moore {
            moore.set(f, e, c, true);
        }
        RuleTable {
            von_neumann: VonNeumannTable::from_faces(&self.von_neumann),
            moore,
        }
    }
}

pub fn write_config<W: Write>(
    w: &mut W,
    seed: &[u8],
    table: &RuleTable,
) -> Result<(), GrowthError> {
    writeln!(w, "Seed: ")?;
    for &cell in seed {
        write!(w, "{}", (cell != 0) as u8)?;
    }
    writeln!(w)?;

    writeln!(w)?;
    writeln!(w, "Moore Rules:")?;
    for (f, e, c) in table.moore.entries() {
        writeln!(w, "Faces: {f}   Edges: {e}   Corners: {c}")?;
    }

    writeln!(w)?;
    writeln!(w, "VN Rules:")?;
    for f in table.von_neumann.faces() {
        writeln!(w, "Faces: {f}")?;
    }
    writeln!(w)?;
    Ok(())
}

/// Append one record to `path`, creating the file if needed.
pub fn append_config(path: &Path, seed: &[u8], table: &RuleTable) -> Result<(), GrowthError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut w = BufWriter::new(file);
    write_config(&mut w, seed, table)?;
    w.flush()?;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Between,
    SeedDigits,
    Moore,
    VonNeumann,
}

fn parse_error(line: usize, message: impl Into<String>) -> GrowthError {
    GrowthError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_count(
    line: usize,
    token: Option<&str>,
    label: &str,
    max: usize,
) -> Result<u8, GrowthError> {
    let value: u8 = token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| parse_error(line, format!("expected a number after {label}")))?;
    if value as usize > max {
        return Err(parse_error(line, format!("{label} {value} exceeds {max}")));
    }
    Ok(value)
}

fn expect_label(line: usize, token: Option<&str>, label: &str) -> Result<(), GrowthError> {
    match token {
        Some(t) if t == label => Ok(()),
        _ => Err(parse_error(line, format!("expected `{label}`"))),
    }
}

/// Parse every record in `text`.
pub fn parse_config(text: &str) -> Result<Vec<SavedConfig>, GrowthError> {
    let mut records: Vec<SavedConfig> = Vec::new();
    let mut section = Section::Between;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();

        match trimmed {
            "Seed:" => {
                records.push(SavedConfig::default());
                section = Section::SeedDigits;
                continue;
            }
            "Moore Rules:" | "VN Rules:" if records.is_empty() => {
                return Err(parse_error(line, "rules before any seed"));
            }
            "Moore Rules:" => {
                section = Section::Moore;
                continue;
            }
            "VN Rules:" => {
                section = Section::VonNeumann;
                continue;
            }
            _ => {}
        }

        let Some(record) = records.last_mut() else {
            if trimmed.is_empty() {
                continue;
            }
            return Err(parse_error(line, "text before the first `Seed:` line"));
        };

        if trimmed.is_empty() {
            section = Section::Between;
            continue;
        }

        match section {
            Section::SeedDigits => {
                for ch in trimmed.chars() {
                    match ch {
                        '0' => record.seed.push(0),
                        '1' => record.seed.push(1),
                        other => return Err(parse_error(line, format!("bad seed digit {other:?}"))),
                    }
                }
                section = Section::Between;
            }
            Section::Moore => {
                let mut tokens = trimmed.split_whitespace();
                expect_label(line, tokens.next(), "Faces:")?;
                let f = parse_count(line, tokens.next(), "Faces:", MAX_FACES)?;
                expect_label(line, tokens.next(), "Edges:")?;
                let e = parse_count(line, tokens.next(), "Edges:", MAX_EDGES)?;
                expect_label(line, tokens.next(), "Corners:")?;
                let c = parse_count(line, tokens.next(), "Corners:", MAX_CORNERS)?;
                record.moore.push((f, e, c));
            }
            Section::VonNeumann => {
                let mut tokens = trimmed.split_whitespace();
                expect_label(line, tokens.next(), "Faces:")?;
                let f = parse_count(line, tokens.next(), "Faces:", MAX_FACES)?;
                if f == 0 {
                    return Err(parse_error(line, "Von Neumann rules start at one face"));
                }
                record.von_neumann.push(f);
            }
            Section::Between => {
                return Err(parse_error(line, format!("unexpected line {trimmed:?}")));
            }
        }
    }

    Ok(records)
}
