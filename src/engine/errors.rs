use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised by the key-value store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Destination already contains data: {0}")]
    DestinationExists(PathBuf),

    #[error("Store not found: {0}")]
    NotFound(PathBuf),

    #[error("Store opened read-only cannot be written: {0}")]
    ReadOnly(PathBuf),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] heed::Error),

    #[error("LSM store error: {0}")]
    Lsm(#[from] fjall::Error),

    #[error("Unknown store backend: {0}")]
    UnknownBackend(String),
}

/// Errors raised by the image encode collaborator. All of them are per-record
/// and make the merge skip the record.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Fatal errors of a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read record list {path}: {source}")]
    ListRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Record list {0} contains no entries")]
    EmptyList(PathBuf),

    #[error("Malformed entry in {path} at line {line}: {content:?}")]
    MalformedList {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error(
        "Existing store exhausted at plan position {position}: plan expects {expected} records, store yielded {found}"
    )]
    PlanCursorMismatch {
        position: u64,
        expected: u64,
        found: u64,
    },

    #[error("Incorrect data field size {actual} for {path}, expected {expected}")]
    SizeConsistency {
        path: String,
        expected: u64,
        actual: u64,
    },

    #[error("Destination already contains data: {0}")]
    DestinationExists(PathBuf),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Payload serialization error: {0}")]
    Serialize(#[from] bincode::Error),
}

impl From<StoreError> for MergeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DestinationExists(path) => MergeError::DestinationExists(path),
            other => MergeError::Store(other),
        }
    }
}

impl MergeError {
    pub fn log_error(&self) {
        match self {
            MergeError::InvalidInput(e) => {
                error!("Invalid merge input: {}", e);
            }
            MergeError::ListRead { path, source } => {
                error!("Failed to read record list {:?}: {}", path, source);
                debug!("Record list read error details: {:?}", source);
            }
            MergeError::EmptyList(path) => {
                error!("Record list {:?} contains no entries", path);
            }
            MergeError::MalformedList {
                path,
                line,
                content,
            } => {
                error!("Malformed entry in {:?} at line {}", path, line);
                debug!("Malformed line content: {:?}", content);
            }
            MergeError::PlanCursorMismatch {
                position,
                expected,
                found,
            } => {
                error!(
                    "Existing store ran out of records at position {}: expected {}, found {}",
                    position, expected, found
                );
                debug!("Precount source and existing store disagree; output must be discarded");
            }
            MergeError::SizeConsistency {
                path,
                expected,
                actual,
            } => {
                error!(
                    "Incorrect data field size {} for {}, expected {}",
                    actual, path, expected
                );
            }
            MergeError::DestinationExists(path) => {
                error!("Destination {:?} already contains data", path);
            }
            MergeError::Store(e) => {
                error!("Store error: {}", e);
                debug!("Store error details: {:?}", e);
            }
            MergeError::Serialize(e) => {
                error!("Payload serialization failed: {}", e);
                debug!("Serialization error details: {:?}", e);
            }
        }
    }
}
