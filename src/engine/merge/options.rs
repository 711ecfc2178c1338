use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::errors::MergeError;
use crate::engine::kv::StoreBackend;

use super::transform::TransformConfig;

/// Everything one merge run needs to know.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub grayscale: bool,
    pub shuffle: bool,
    /// Seed for the shuffle; a fresh entropy seed is drawn when unset.
    pub seed: Option<u64>,
    pub existing_backend: StoreBackend,
    pub destination_backend: StoreBackend,
    pub resize_height: u32,
    pub resize_width: u32,
    pub check_size: bool,
    pub encoded: bool,
    pub encode_type: Option<String>,
    pub new_record_list: PathBuf,
    pub destination: PathBuf,
    pub existing_store: PathBuf,
    /// List whose entry count stands in for the existing store's record count.
    pub existing_count_list: Option<PathBuf>,
    /// Prefix joined to every relative path of the new record list.
    pub root_folder: Option<PathBuf>,
}

impl MergeOptions {
    pub fn new(
        new_record_list: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        existing_store: impl Into<PathBuf>,
    ) -> Self {
        Self {
            new_record_list: new_record_list.into(),
            destination: destination.into(),
            existing_store: existing_store.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        let required = [
            ("new record list", &self.new_record_list),
            ("destination", &self.destination),
            ("existing store", &self.existing_store),
        ];
        for (what, path) in required {
            if path.as_os_str().is_empty() {
                return Err(MergeError::InvalidInput(format!("{} path is required", what)));
            }
        }
        if self
            .existing_count_list
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(MergeError::InvalidInput(
                "existing count list path is empty".into(),
            ));
        }
        if self.destination == self.existing_store {
            return Err(MergeError::InvalidInput(
                "destination must differ from the existing store".into(),
            ));
        }
        Ok(())
    }

    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            grayscale: self.grayscale,
            resize_height: self.resize_height,
            resize_width: self.resize_width,
            check_size: self.check_size,
            encoded: self.encoded,
            encode_type: self.encode_type.clone().filter(|t| !t.trim().is_empty()),
            root_folder: self.root_folder.clone(),
        }
    }
}
