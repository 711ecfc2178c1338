use serde::{Deserialize, Serialize};

use crate::engine::errors::MergeError;

/// Payload stored for a newly ingested record.
///
/// Raw datums carry planar (channel-major) pixel bytes; encoded datums carry the
/// bytes of an encoded image file and name its format in `encoding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datum {
    pub label: i32,
    pub channels: u32,
    pub height: u32,
    pub width: u32,
    pub encoded: bool,
    pub encoding: Option<String>,
    pub data: Vec<u8>,
}

impl Datum {
    /// Number of samples the image holds once decoded.
    pub fn footprint(&self) -> u64 {
        self.channels as u64 * self.height as u64 * self.width as u64
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MergeError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MergeError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
