use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::engine::errors::{EncodeError, MergeError};
use crate::shared::path::resolve_listed;

use super::datum::Datum;
use super::ingest::PendingRecord;

/// Per-record parameters handed to the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Resize only when both dimensions are non-zero.
    pub resize_height: u32,
    pub resize_width: u32,
    pub is_color: bool,
    /// Target encoding; `None` stores raw pixels.
    pub encoding: Option<String>,
}

/// Image decode/resize/encode collaborator.
pub trait ImageEncoder {
    fn encode(&self, path: &Path, label: i32, options: &EncodeOptions)
    -> Result<Datum, EncodeError>;
}

#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    pub grayscale: bool,
    pub resize_height: u32,
    pub resize_width: u32,
    pub check_size: bool,
    pub encoded: bool,
    pub encode_type: Option<String>,
    pub root_folder: Option<PathBuf>,
}

/// Lower-cased extension of `path`, if it has one.
pub fn infer_encoding(path: &str) -> Option<String> {
    let file_name = Path::new(path).file_name()?.to_str()?;
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Turns pending records into serialized datums.
///
/// A failed encode yields `Ok(None)` and the caller skips the record. With
/// `check_size`, the first successful datum fixes the footprint every later one
/// must match; a mismatch aborts the merge.
pub struct RecordTransformer {
    encoder: Box<dyn ImageEncoder>,
    config: TransformConfig,
    expected_footprint: Option<u64>,
    transformed: u64,
    failed: u64,
}

impl RecordTransformer {
    pub fn new(encoder: Box<dyn ImageEncoder>, mut config: TransformConfig) -> Self {
        if let Some(t) = config.encode_type.take() {
            let t = t.trim().trim_start_matches('.').to_ascii_lowercase();
            if !t.is_empty() {
                if !config.encoded {
                    info!(
                        target: "record_transformer::new",
                        encode_type = %t,
                        "encode_type specified, assuming encoded=true"
                    );
                }
                config.encoded = true;
                config.encode_type = Some(t);
            }
        }
        Self {
            encoder,
            config,
            expected_footprint: None,
            transformed: 0,
            failed: 0,
        }
    }

    pub fn transformed(&self) -> u64 {
        self.transformed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    fn encode_options(&self, record: &PendingRecord) -> EncodeOptions {
        let encoding = match (&self.config.encode_type, self.config.encoded) {
            (Some(t), _) => Some(t.clone()),
            (None, true) => {
                let guessed = infer_encoding(&record.path);
                if guessed.is_none() {
                    warn!(
                        target: "record_transformer::encode_options",
                        path = %record.path,
                        "Failed to guess the encoding of '{}'", record.path
                    );
                }
                guessed
            }
            (None, false) => None,
        };

        EncodeOptions {
            resize_height: self.config.resize_height,
            resize_width: self.config.resize_width,
            is_color: !self.config.grayscale,
            encoding,
        }
    }

    pub fn transform(&mut self, record: &PendingRecord) -> Result<Option<Vec<u8>>, MergeError> {
        let options = self.encode_options(record);
        let source = resolve_listed(self.config.root_folder.as_deref(), &record.path);

        let datum = match self.encoder.encode(&source, record.label, &options) {
            Ok(datum) => datum,
            Err(e) => {
                self.failed += 1;
                warn!(
                    target: "record_transformer::transform",
                    path = %record.path, error = %e,
                    "Skipping record that could not be transformed"
                );
                return Ok(None);
            }
        };

        if self.config.check_size {
            let footprint = datum.footprint();
            match self.expected_footprint {
                None => self.expected_footprint = Some(footprint),
                Some(expected) if expected != footprint => {
                    return Err(MergeError::SizeConsistency {
                        path: record.path.clone(),
                        expected,
                        actual: footprint,
                    });
                }
                Some(_) => {}
            }
        }

        let payload = datum.to_bytes()?;
        self.transformed += 1;
        debug!(
            target: "record_transformer::transform",
            path = %record.path, bytes = payload.len(),
            "Transformed record"
        );
        Ok(Some(payload))
    }
}
