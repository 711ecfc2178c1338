use image::ColorType;
use std::path::{Path, PathBuf};

/// Writes small image files with a deterministic gradient. The codec follows
/// the file extension (`png`, `jpg`, `pgm`, ...).
pub struct ImageFileFactory {
    color: bool,
    height: u32,
    width: u32,
}

impl ImageFileFactory {
    pub fn new() -> Self {
        Self {
            color: false,
            height: 2,
            width: 3,
        }
    }

    pub fn color(mut self) -> Self {
        self.color = true;
        self
    }

    pub fn with_size(mut self, height: u32, width: u32) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    pub fn channels(&self) -> u32 {
        if self.color { 3 } else { 1 }
    }

    /// Interleaved samples written to every file.
    pub fn pixels(&self) -> Vec<u8> {
        (0..self.channels() * self.height * self.width)
            .map(|i| (i * 7 % 256) as u8)
            .collect()
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let color_type = if self.color {
            ColorType::Rgb8
        } else {
            ColorType::L8
        };
        image::save_buffer(&path, &self.pixels(), self.width, self.height, color_type)
            .expect("write image");
        path
    }
}
