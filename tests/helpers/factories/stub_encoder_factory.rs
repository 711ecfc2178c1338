use crate::engine::errors::EncodeError;
use crate::engine::merge::{Datum, EncodeOptions, ImageEncoder};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Encoder that fabricates datums without touching the filesystem.
pub struct StubEncoder {
    dims: HashMap<String, (u32, u32, u32)>,
    default_dims: (u32, u32, u32),
    failing: HashSet<String>,
}

impl ImageEncoder for StubEncoder {
    fn encode(
        &self,
        path: &Path,
        label: i32,
        options: &EncodeOptions,
    ) -> Result<Datum, EncodeError> {
        let key = path.to_string_lossy().into_owned();
        if self.failing.contains(&key) {
            return Err(EncodeError::UnsupportedFormat(format!("cannot decode {}", key)));
        }
        let (channels, mut height, mut width) =
            self.dims.get(&key).copied().unwrap_or(self.default_dims);
        if options.resize_height > 0 && options.resize_width > 0 {
            height = options.resize_height;
            width = options.resize_width;
        }
        Ok(Datum {
            label,
            channels,
            height,
            width,
            encoded: options.encoding.is_some(),
            encoding: options.encoding.clone(),
            data: vec![label as u8; (channels * height * width) as usize],
        })
    }
}

pub struct StubEncoderFactory {
    dims: HashMap<String, (u32, u32, u32)>,
    default_dims: (u32, u32, u32),
    failing: HashSet<String>,
}

impl StubEncoderFactory {
    pub fn new() -> Self {
        Self {
            dims: HashMap::new(),
            default_dims: (3, 2, 2),
            failing: HashSet::new(),
        }
    }

    pub fn with_dims(mut self, path: &str, channels: u32, height: u32, width: u32) -> Self {
        self.dims.insert(path.into(), (channels, height, width));
        self
    }

    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing.insert(path.into());
        self
    }

    pub fn create(self) -> StubEncoder {
        StubEncoder {
            dims: self.dims,
            default_dims: self.default_dims,
            failing: self.failing,
        }
    }

    pub fn boxed(self) -> Box<dyn ImageEncoder> {
        Box::new(self.create())
    }
}
