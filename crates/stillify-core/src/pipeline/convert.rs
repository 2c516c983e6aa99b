//! Single-image conversion and per-item dispatch.
//!
//! One call per input item: containers are unwrapped, HEIF payloads go
//! through decode, encode, then metadata transplant, and baseline
//! payloads are copied verbatim. Exactly one `<base>.jpg` is written
//! per successful item; a failed decode leaves no output behind.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::types::{ConvertedImage, InputKind, SourceItem, TransplantOutcome};

use super::container::{self, PayloadKind};
use super::decode::HeifDecoder;
use super::encode::write_jpeg;
use super::exif::transplant;

/// Converts individual input items to JPEG.
pub struct Converter {
    decoder: HeifDecoder,
    quality: u8,
}

impl Converter {
    /// Create a converter encoding at the given JPEG quality (1-100).
    pub fn new(quality: u8) -> Self {
        Self {
            decoder: HeifDecoder::new(),
            quality,
        }
    }

    /// Route one input item to the appropriate conversion path.
    ///
    /// Returns `Ok(None)` for items that legitimately produce no
    /// output: unrecognized types and containers without an image
    /// entry. Errors are scoped to this item only.
    pub fn process_item(
        &self,
        item: &SourceItem,
        output_dir: &Path,
    ) -> Result<Option<ConvertedImage>, PipelineError> {
        match item.kind {
            InputKind::Container => self.convert_container(item, output_dir),
            InputKind::Bitstream => {
                let bytes = std::fs::read(&item.path).map_err(|e| PipelineError::Read {
                    path: item.path.clone(),
                    message: e.to_string(),
                })?;
                self.convert_bitstream(&item.base_name, &bytes, &item.path, output_dir)
                    .map(Some)
            }
            InputKind::Baseline | InputKind::Unrecognized => Ok(None),
        }
    }

    /// Unwrap a `.livp` container and convert its primary image.
    fn convert_container(
        &self,
        item: &SourceItem,
        output_dir: &Path,
    ) -> Result<Option<ConvertedImage>, PipelineError> {
        let mut archive = container::open(&item.path)?;
        let Some(payload) = container::select_payload(&mut archive, &item.path)? else {
            tracing::debug!("No image entry in container {:?}", item.path);
            return Ok(None);
        };

        match payload.kind {
            PayloadKind::Bitstream => self
                .convert_bitstream(&item.base_name, &payload.bytes, &item.path, output_dir)
                .map(Some),
            PayloadKind::Baseline => {
                self.copy_baseline(&item.base_name, &payload.bytes, output_dir)
                    .map(Some)
            }
        }
    }

    /// Decode a HEIF payload, encode it as JPEG, and transplant the
    /// embedded metadata into the written file.
    pub fn convert_bitstream(
        &self,
        base_name: &str,
        bytes: &[u8],
        origin: &Path,
        output_dir: &Path,
    ) -> Result<ConvertedImage, PipelineError> {
        let payload = self.decoder.decode(bytes, origin)?;
        let output_path = output_path(output_dir, base_name);

        write_jpeg(&payload.pixels, &output_path, self.quality)?;
        let metadata = transplant(&output_path, &payload.exif);

        tracing::debug!(
            "Converted {origin:?} -> {output_path:?} ({}x{})",
            payload.pixels.width,
            payload.pixels.height
        );
        Ok(ConvertedImage {
            output_path,
            width: payload.pixels.width,
            height: payload.pixels.height,
            metadata,
        })
    }

    /// Write an already-baseline payload verbatim, no re-compression.
    fn copy_baseline(
        &self,
        base_name: &str,
        bytes: &[u8],
        output_dir: &Path,
    ) -> Result<ConvertedImage, PipelineError> {
        let path = output_path(output_dir, base_name);
        std::fs::write(&path, bytes).map_err(|e| PipelineError::Encode {
            path: path.clone(),
            message: format!("Cannot write baseline copy: {e}"),
        })?;

        // Header-only dimension probe; the payload is trusted as-is
        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()
            .and_then(|r| r.into_dimensions().ok())
            .unwrap_or((0, 0));

        Ok(ConvertedImage {
            output_path: path,
            width,
            height,
            metadata: TransplantOutcome::NoMetadata,
        })
    }
}

fn output_path(output_dir: &Path, base_name: &str) -> PathBuf {
    output_dir.join(format!("{base_name}.jpg"))
}
