use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::CartridgeError;
use crate::generator;
use crate::header::HeaderCodes;
use crate::verify;
use crate::worklist::{WorklistEntry, WorklistError};

/// What happened to one worklist entry.
#[derive(Debug)]
pub enum Outcome {
    Generated(PathBuf),
    /// Same file as entry `first`; it was not written again.
    Duplicate { first: usize, path: PathBuf },
    Failed(CartridgeError),
    /// The entry's text was not a valid triple.
    Unparsable(WorklistError),
}

#[derive(Debug)]
pub struct EntryReport {
    pub index: usize,
    /// `None` when the entry could not be parsed.
    pub codes: Option<HeaderCodes>,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct WorklistReport {
    pub entries: Vec<EntryReport>,
}

impl WorklistReport {
    pub fn generated(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            Outcome::Generated(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Entries that produced no file: bad codes, I/O errors and unparsable text.
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Failed(_) | Outcome::Unparsable(_)))
            .count()
    }

    pub fn duplicates(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Duplicate { .. }))
            .count()
    }
}

/// Options for a worklist run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    /// Re-read every generated file and check its layout.
    pub verify: bool,
}

/// Generates every entry in order.
///
/// A failing or unparsable entry is logged and recorded, and the run carries on with the
/// next one. Entries that would produce a file already written in this run are flagged
/// as duplicates instead of being overwritten.
pub fn run(
    entries: impl IntoIterator<Item = WorklistEntry>,
    options: &RunOptions,
) -> WorklistReport {
    let mut report = WorklistReport::default();
    let mut written: HashMap<PathBuf, usize> = HashMap::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let (codes, outcome) = match entry {
            Ok(codes) => (Some(codes), run_entry(index, codes, options, &mut written)),
            Err(e) => {
                log::error!("Entry {}: {}", index, e);
                (None, Outcome::Unparsable(e))
            }
        };
        report.entries.push(EntryReport {
            index,
            codes,
            outcome,
        });
    }

    log::info!(
        "Worklist done: {} entries, {} failed, {} duplicates",
        report.entries.len(),
        report.failures(),
        report.duplicates()
    );
    report
}

fn run_entry(
    index: usize,
    codes: HeaderCodes,
    options: &RunOptions,
    written: &mut HashMap<PathBuf, usize>,
) -> Outcome {
    let header = match codes.resolve() {
        Ok(header) => header,
        Err(e) => {
            log::error!("Entry {} {}: {}", index, codes, e);
            return Outcome::Failed(e);
        }
    };

    let path = options.out_dir.join(header.filename());
    if let Some(&first) = written.get(&path) {
        log::warn!(
            "Entry {} {} would overwrite {} from entry {}; skipped",
            index,
            codes,
            path.display(),
            first
        );
        return Outcome::Duplicate { first, path };
    }

    let result = generator::generate_in(&options.out_dir, codes).and_then(|path| {
        if options.verify {
            verify::verify_file(&path, codes)?;
        }
        Ok(path)
    });

    match result {
        Ok(path) => {
            written.insert(path.clone(), index);
            Outcome::Generated(path)
        }
        Err(e) => {
            log::error!("Entry {} {}: {}", index, codes, e);
            Outcome::Failed(e)
        }
    }
}
