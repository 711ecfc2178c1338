use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use tracing::debug;

use crate::engine::errors::EncodeError;

use super::datum::Datum;
use super::transform::{EncodeOptions, ImageEncoder, infer_encoding};

/// Channel count a datum carries for the requested colour mode.
pub fn stored_channels(is_color: bool) -> u32 {
    if is_color { 3 } else { 1 }
}

/// Maps an encoding name such as `png` or `jpg` to a codec.
pub fn format_for(encoding: &str) -> Result<ImageFormat, EncodeError> {
    ImageFormat::from_extension(encoding)
        .ok_or_else(|| EncodeError::UnsupportedFormat(encoding.to_string()))
}

fn source_format(path: &Path) -> Option<ImageFormat> {
    path.to_str()
        .and_then(infer_encoding)
        .and_then(ImageFormat::from_extension)
}

/// Channel-major copy of interleaved samples.
pub fn to_planar(interleaved: &[u8], channels: usize) -> Vec<u8> {
    let plane = interleaved.len() / channels;
    let mut out = vec![0u8; interleaved.len()];
    for (i, px) in interleaved.chunks_exact(channels).enumerate() {
        for (c, v) in px.iter().enumerate() {
            out[c * plane + i] = *v;
        }
    }
    out
}

fn with_color(image: DynamicImage, is_color: bool) -> DynamicImage {
    if is_color {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        DynamicImage::ImageLuma8(image.to_luma8())
    }
}

/// Default [`ImageEncoder`], backed by the `image` codecs.
///
/// A file already in the requested encoding is stored byte for byte when no
/// resize is asked for and its colour mode matches; that check only reads the
/// image header. Everything else is decoded, converted to grey or RGB, resized
/// and then either re-encoded or stored as planar samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterEncoder;

impl RasterEncoder {
    fn passthrough(
        path: &Path,
        bytes: &[u8],
        target: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Option<(u32, u32)>, EncodeError> {
        if options.resize_height != 0 || options.resize_width != 0 {
            return Ok(None);
        }
        if source_format(path) != Some(target) {
            return Ok(None);
        }
        let decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_decoder()?;
        let is_color = decoder.color_type().channel_count() >= 3;
        if is_color != options.is_color {
            return Ok(None);
        }
        let (width, height) = decoder.dimensions();
        Ok(Some((height, width)))
    }
}

impl ImageEncoder for RasterEncoder {
    fn encode(
        &self,
        path: &Path,
        label: i32,
        options: &EncodeOptions,
    ) -> Result<Datum, EncodeError> {
        let bytes = std::fs::read(path)?;
        let channels = stored_channels(options.is_color);

        let target = options.encoding.as_deref().map(format_for).transpose()?;
        let unchanged = match target {
            Some(format) => Self::passthrough(path, &bytes, format, options)?,
            None => None,
        };
        if let Some((height, width)) = unchanged {
            debug!(target: "raster::encode", ?path, "Storing file bytes unchanged");
            return Ok(Datum {
                label,
                channels,
                height,
                width,
                encoded: true,
                encoding: options.encoding.clone(),
                data: bytes,
            });
        }

        let decoded = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()?
            .decode()?;
        let mut image = with_color(decoded, options.is_color);
        if options.resize_height > 0 && options.resize_width > 0 {
            image = image.resize_exact(
                options.resize_width,
                options.resize_height,
                FilterType::Triangle,
            );
        }
        let (height, width) = (image.height(), image.width());

        let data = match target {
            Some(format) => {
                let mut out = Vec::new();
                image.write_to(&mut Cursor::new(&mut out), format)?;
                out
            }
            None => to_planar(image.as_bytes(), channels as usize),
        };

        Ok(Datum {
            label,
            channels,
            height,
            width,
            encoded: target.is_some(),
            encoding: options.encoding.clone(),
            data,
        })
    }
}
