//! Lists of cartridges to generate.
//!
//! A worklist file holds one `mbc, rom, ram` triple per line. Codes are hex (`0x13`) or
//! decimal, separated by commas and/or whitespace; parentheses are ignored so tuples can
//! be pasted as-is. Everything after `#` is a comment.
//!
//! ```text
//! # no MBC
//! 0x00, 0x00, 0x00
//! ( 0x09, 0x00, 0x02 )
//! # MBC1
//! 0x01 0x03 0x02
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::header::HeaderCodes;

/// Cartridges generated when no worklist is given: the no-MBC variants and the MBC1
/// cartridge the memory tests load.
pub const DEFAULT_WORKLIST: [HeaderCodes; 6] = [
    // no MBC
    HeaderCodes::new(0x00, 0x00, 0x00),
    HeaderCodes::new(0x08, 0x00, 0x00),
    HeaderCodes::new(0x09, 0x00, 0x00),
    HeaderCodes::new(0x09, 0x00, 0x01),
    HeaderCodes::new(0x09, 0x00, 0x02),
    // MBC1
    HeaderCodes::new(0x01, 0x03, 0x02),
];

#[derive(Debug)]
pub enum WorklistError {
    /// A field that is not a byte-sized hex or decimal number.
    BadCode(String),
    /// A triple with the wrong number of fields.
    FieldCount(usize),
    /// A parse error on a given (1-based) line of a worklist file.
    AtLine { line: usize, error: Box<WorklistError> },
    /// A parse error in a triple given on the command line.
    InArgument { text: String, error: Box<WorklistError> },
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for WorklistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorklistError::BadCode(text) => write!(f, "'{}' is not a header code (0x00-0xff)", text),
            WorklistError::FieldCount(found) => {
                write!(f, "expected 3 codes (mbc, rom, ram), found {}", found)
            }
            WorklistError::AtLine { line, error } => write!(f, "line {}: {}", line, error),
            WorklistError::InArgument { text, error } => write!(f, "'{}': {}", text, error),
            WorklistError::Read { path, source } => {
                write!(f, "failed to read worklist '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for WorklistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorklistError::Read { source, .. } => Some(source),
            WorklistError::AtLine { error, .. } | WorklistError::InArgument { error, .. } => {
                Some(error.as_ref())
            }
            _ => None,
        }
    }
}

/// Parses a single code: `0x1b`, `0X1B` or `27`.
pub fn parse_code(text: &str) -> Result<u8, WorklistError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|_| WorklistError::BadCode(text.to_string()))
}

/// Parses `mbc,rom,ram` (commas, whitespace and parentheses all separate fields).
pub fn parse_triple(text: &str) -> Result<HeaderCodes, WorklistError> {
    let fields: Vec<&str> = text
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() != 3 {
        return Err(WorklistError::FieldCount(fields.len()));
    }
    Ok(HeaderCodes::new(
        parse_code(fields[0])?,
        parse_code(fields[1])?,
        parse_code(fields[2])?,
    ))
}

/// One worklist entry: the codes, or why its text could not be parsed.
pub type WorklistEntry = Result<HeaderCodes, WorklistError>;

/// The built-in list as worklist entries.
pub fn default_entries() -> Vec<WorklistEntry> {
    DEFAULT_WORKLIST.iter().copied().map(Ok).collect()
}

/// Parses worklist text, one entry per non-blank, non-comment line.
///
/// A bad line becomes an `AtLine` error entry; the lines around it are still parsed.
pub fn parse_worklist(text: &str) -> Vec<WorklistEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                return None;
            }
            Some(parse_triple(line).map_err(|error| WorklistError::AtLine {
                line: i + 1,
                error: Box::new(error),
            }))
        })
        .collect()
}

/// Parses command-line triples, one entry per argument.
pub fn parse_arguments(triples: &[String]) -> Vec<WorklistEntry> {
    triples
        .iter()
        .map(|text| {
            parse_triple(text).map_err(|error| WorklistError::InArgument {
                text: text.clone(),
                error: Box::new(error),
            })
        })
        .collect()
}

/// Reads and parses a worklist file. Only failing to read the file is an error here.
pub fn load_worklist(path: &Path) -> Result<Vec<WorklistEntry>, WorklistError> {
    let text = fs::read_to_string(path).map_err(|source| WorklistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_worklist(&text);
    log::debug!(
        "Loaded {} entries from {} ({} unparsable)",
        entries.len(),
        path.display(),
        entries.iter().filter(|entry| entry.is_err()).count()
    );
    Ok(entries)
}

/// Index pairs `(first, later)` of entries that would write the same file.
///
/// Unparsable entries and entries with unknown codes produce no file and are skipped.
pub fn find_collisions(entries: &[WorklistEntry]) -> Vec<(usize, usize)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut collisions = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(header) = entry.as_ref().ok().and_then(|codes| codes.resolve().ok()) else {
            continue;
        };
        match seen.get(&header.filename()) {
            Some(&first) => collisions.push((first, index)),
            None => {
                seen.insert(header.filename(), index);
            }
        }
    }
    collisions
}
