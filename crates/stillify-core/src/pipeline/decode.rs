//! HEIF bitstream decoding via libheif.
//!
//! Decodes a payload into interleaved RGB pixels and pulls the raw
//! Exif metadata block off the primary image handle. The block is kept
//! opaque here; `pipeline::exif` knows its layout.

use std::path::Path;

use libheif_rs::{ColorSpace, HeifContext, ItemId, LibHeif, RgbChroma};

use crate::error::PipelineError;
use crate::types::DecodedPixels;

/// A decoded HEIF payload: pixels plus the embedded metadata block.
#[derive(Debug)]
pub struct HeifPayload {
    pub pixels: DecodedPixels,
    /// Raw Exif block as stored in the container; empty when the
    /// payload carries no metadata.
    pub exif: Vec<u8>,
}

/// Decoder for HEIF/HEIC payload bytes.
pub struct HeifDecoder {
    lib_heif: LibHeif,
}

impl Default for HeifDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeifDecoder {
    pub fn new() -> Self {
        Self {
            lib_heif: LibHeif::new(),
        }
    }

    /// Decode an in-memory HEIF payload.
    ///
    /// `path` identifies the originating input in errors; the bytes may
    /// come from a file or a container entry.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<HeifPayload, PipelineError> {
        let ctx = HeifContext::read_from_bytes(bytes).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read HEIF container: {e}"),
        })?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("No primary image: {e}"),
            })?;

        // Exif extraction is best-effort; a missing block is not an error
        let exif = Self::extract_exif(&handle);

        let image = self
            .lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Pixel decode failed: {e}"),
            })?;

        let planes = image.planes();
        let interleaved = planes.interleaved.ok_or_else(|| PipelineError::Decode {
            path: path.to_path_buf(),
            message: "Decoded image has no interleaved plane".to_string(),
        })?;

        Ok(HeifPayload {
            pixels: DecodedPixels {
                width: interleaved.width,
                height: interleaved.height,
                stride: interleaved.stride,
                data: interleaved.data.to_vec(),
            },
            exif,
        })
    }

    /// Pull the first Exif metadata block off an image handle.
    ///
    /// Returns an empty vec when none is present or extraction fails.
    fn extract_exif(handle: &libheif_rs::ImageHandle) -> Vec<u8> {
        let mut meta_ids: Vec<ItemId> = vec![0; 1];
        let count = handle.metadata_block_ids(&mut meta_ids, b"Exif");
        if count != 1 {
            return Vec::new();
        }
        match handle.metadata(meta_ids[0]) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to extract Exif block: {e}");
                Vec::new()
            }
        }
    }
}
