//! Baseline JPEG encoding.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::PipelineError;
use crate::types::DecodedPixels;

/// Encode decoded pixels as a baseline JPEG at `quality` (1-100),
/// overwriting any existing file at `path`.
pub fn write_jpeg(pixels: &DecodedPixels, path: &Path, quality: u8) -> Result<(), PipelineError> {
    let tight = pixels.to_tight_rgb();
    let file = File::create(path).map_err(|e| PipelineError::Encode {
        path: path.to_path_buf(),
        message: format!("Cannot create output file: {e}"),
    })?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder
        .write_image(&tight, pixels.width, pixels.height, ExtendedColorType::Rgb8)
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    // The buffer's drop would swallow a tail-flush error; surface it
    writer.into_inner().map_err(|e| PipelineError::Encode {
        path: path.to_path_buf(),
        message: format!("Flush failed: {}", e.error()),
    })?;
    Ok(())
}
