use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::engine::errors::MergeError;

/// One `<path> <label>` entry of a record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub path: String,
    pub label: i32,
}

impl PendingRecord {
    pub fn new(path: impl Into<String>, label: i32) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }
}

/// Reads record lists: one `<path> <label>` pair per line, separated by
/// whitespace. The label is the last token, so paths may contain spaces.
pub struct IngestionReader;

impl IngestionReader {
    pub fn read(path: &Path) -> Result<Vec<PendingRecord>, MergeError> {
        let file = File::open(path).map_err(|source| MergeError::ListRead {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse(BufReader::new(file), path)?;
        info!(
            target: "ingestion_reader::read",
            ?path, records = records.len(),
            "Read record list"
        );
        Ok(records)
    }

    /// Parses a list from any reader; `source` names it in errors.
    pub fn parse<R: BufRead>(reader: R, source: &Path) -> Result<Vec<PendingRecord>, MergeError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| MergeError::ListRead {
                path: source.to_path_buf(),
                source: e,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            records.push(Self::parse_line(trimmed).ok_or_else(|| {
                MergeError::MalformedList {
                    path: source.to_path_buf(),
                    line: idx + 1,
                    content: line.clone(),
                }
            })?);
        }

        if records.is_empty() {
            return Err(MergeError::EmptyList(source.to_path_buf()));
        }
        debug!(target: "ingestion_reader::parse", ?source, records = records.len(), "Parsed list");
        Ok(records)
    }

    fn parse_line(line: &str) -> Option<PendingRecord> {
        let (path, label) = line.rsplit_once(char::is_whitespace)?;
        let path = path.trim_end();
        if path.is_empty() {
            return None;
        }
        let label = label.parse::<i32>().ok()?;
        Some(PendingRecord::new(path, label))
    }

    /// Number of entries in a list used only to size the existing store.
    pub fn count(path: &Path) -> Result<u64, MergeError> {
        Ok(Self::read(path)?.len() as u64)
    }
}
