//! EXIF transplantation from a HEIF payload into a written JPEG.
//!
//! HEIF stores the Exif block behind an envelope: a 4-byte offset
//! marker plus the 6-byte `Exif\0\0` tag, so the TIFF structure the
//! EXIF codec expects starts 10 bytes in. Rather than trusting that
//! constant, the TIFF byte-order signature is located by scanning the
//! head of the block; the constant is only a fallback for producers
//! whose envelope hides the signature.
//!
//! Failure here never fails the conversion: on any decode or write
//! problem the original block is persisted to a sidecar file and the
//! pixel-only JPEG stays valid.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use exif::experimental::Writer;
use exif::{In, Tag, Value};
use img_parts::ImageEXIF;
use thiserror::Error;

use crate::types::TransplantOutcome;

/// Fixed envelope size ahead of the TIFF header in HEIF Exif blocks.
const HEIF_EXIF_ENVELOPE_LEN: usize = 10;

/// How far into the block to scan for the TIFF signature.
const TIFF_SCAN_WINDOW: usize = 64;

/// Suffix appended to the output path for salvaged raw blocks.
const SIDECAR_SUFFIX: &str = "_origexif.bin";

#[derive(Debug, Error)]
enum TransplantError {
    #[error("no TIFF header found in metadata block")]
    NoTiffHeader,
    #[error("EXIF codec error: {0}")]
    Codec(#[from] exif::Error),
    #[error("JPEG splice error: {0}")]
    Splice(#[from] img_parts::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the metadata from `raw_block` into the already-written JPEG
/// at `jpeg_path`, forcing orientation to 1 (upright).
///
/// Never propagates failure: a malformed block or failed write results
/// in [`TransplantOutcome::Salvaged`] with the untouched block saved
/// alongside the output.
pub fn transplant(jpeg_path: &Path, raw_block: &[u8]) -> TransplantOutcome {
    if raw_block.is_empty() {
        return TransplantOutcome::NoMetadata;
    }

    match try_transplant(jpeg_path, raw_block) {
        Ok(()) => TransplantOutcome::Applied,
        Err(e) => {
            let sidecar = sidecar_path(jpeg_path);
            tracing::warn!(
                "Metadata transplant failed for {:?}: {e}; saving raw block to {:?}",
                jpeg_path,
                sidecar
            );
            match std::fs::write(&sidecar, raw_block) {
                Ok(()) => TransplantOutcome::Salvaged {
                    sidecar: Some(sidecar),
                },
                Err(io_err) => {
                    tracing::error!("Failed to write sidecar {:?}: {io_err}", sidecar);
                    TransplantOutcome::Salvaged { sidecar: None }
                }
            }
        }
    }
}

fn try_transplant(jpeg_path: &Path, raw_block: &[u8]) -> Result<(), TransplantError> {
    let offset = tiff_offset(raw_block).ok_or(TransplantError::NoTiffHeader)?;
    let rebuilt = rebuild_block(&raw_block[offset..])?;

    let bytes = std::fs::read(jpeg_path)?;
    let mut jpeg = img_parts::jpeg::Jpeg::from_bytes(bytes.into())?;
    // Replaces whatever APP1 the encoder may have emitted
    jpeg.set_exif(Some(rebuilt.into()));

    // Splice into a temp sibling and rename over the original, so a
    // write that dies partway never destroys the valid pixel-only
    // output already on disk.
    let tmp_path = tmp_sibling(jpeg_path);
    if let Err(e) = write_spliced(&tmp_path, jpeg) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp_path, jpeg_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Write the spliced JPEG, surfacing tail-flush errors instead of
/// losing them in the buffer's drop.
fn write_spliced(path: &Path, jpeg: img_parts::jpeg::Jpeg) -> Result<(), TransplantError> {
    let out = File::create(path)?;
    let mut writer = BufWriter::new(out);
    jpeg.encoder().write_to(&mut writer)?;
    writer.into_inner().map_err(|e| e.into_error())?;
    Ok(())
}

fn tmp_sibling(jpeg_path: &Path) -> PathBuf {
    let mut name = jpeg_path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Locate the TIFF header within the head of a raw Exif block.
///
/// Scans for the `II*\0` / `MM\0*` byte-order signature; falls back to
/// the fixed HEIF envelope length when no signature is visible.
fn tiff_offset(block: &[u8]) -> Option<usize> {
    let window = &block[..block.len().min(TIFF_SCAN_WINDOW)];
    for (idx, chunk) in window.windows(4).enumerate() {
        if chunk == b"II*\0" || chunk == b"MM\0*" {
            return Some(idx);
        }
    }
    if block.len() > HEIF_EXIF_ENVELOPE_LEN {
        return Some(HEIF_EXIF_ENVELOPE_LEN);
    }
    None
}

/// Decode a TIFF-aligned Exif block, force orientation to 1, and
/// re-serialize it with every other field copied through.
fn rebuild_block(tiff: &[u8]) -> Result<Vec<u8>, TransplantError> {
    let decoded = exif::Reader::new().read_raw(tiff.to_vec())?;
    let little_endian = tiff.starts_with(b"II");

    let upright = exif::Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![1]),
    };

    let mut writer = Writer::new();
    for field in decoded.fields() {
        if field.tag == Tag::Orientation && field.ifd_num == In::PRIMARY {
            continue;
        }
        writer.push_field(field);
    }
    writer.push_field(&upright);

    let mut cursor = std::io::Cursor::new(Vec::new());
    writer.write(&mut cursor, little_endian)?;
    Ok(cursor.into_inner())
}

/// Sidecar path for a salvaged raw block: `<output>.jpg_origexif.bin`.
fn sidecar_path(jpeg_path: &Path) -> PathBuf {
    let mut name = jpeg_path.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}
