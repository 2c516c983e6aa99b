//! Core data types for the stillify conversion pipeline.

use std::path::PathBuf;

/// Classification of an input by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `.livp` live-photo container (zip bundle)
    Container,
    /// `.heif` / `.heic` bitstream image
    Bitstream,
    /// `.jpg` / `.jpeg` baseline image
    Baseline,
    /// Anything else; skipped by the pipeline
    Unrecognized,
}

/// One input discovered at directory scan time.
///
/// Immutable after discovery; consumed by exactly one worker.
#[derive(Debug, Clone)]
pub struct SourceItem {
    /// Filename without the final extension, used for output naming
    pub base_name: String,
    /// Full path to the source file
    pub path: PathBuf,
    /// Extension classification
    pub kind: InputKind,
}

/// Raw pixels produced by the bitstream decoder.
///
/// Interleaved RGB, one byte per channel, rows padded to `stride`.
#[derive(Debug, Clone)]
pub struct DecodedPixels {
    pub width: u32,
    pub height: u32,
    /// Bytes per row, `>= width * 3`
    pub stride: usize,
    pub data: Vec<u8>,
}

impl DecodedPixels {
    /// Repack the strided rows into a tight `width * 3` RGB buffer,
    /// the layout the JPEG encoder consumes.
    pub fn to_tight_rgb(&self) -> Vec<u8> {
        let row_len = self.width as usize * 3;
        if self.stride == row_len {
            return self.data.clone();
        }
        let mut tight = Vec::with_capacity(row_len * self.height as usize);
        for row in 0..self.height as usize {
            let start = row * self.stride;
            tight.extend_from_slice(&self.data[start..start + row_len]);
        }
        tight
    }
}

/// Outcome of a metadata transplant attempt.
///
/// Typed so callers and tests can assert on the result without
/// depending on log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransplantOutcome {
    /// Metadata decoded, orientation normalized, and written into the file
    Applied,
    /// The payload carried no metadata block; nothing to do
    NoMetadata,
    /// Decode or write failed; the pixel-only output remains valid and
    /// the raw block was persisted to a sidecar. `None` when the
    /// sidecar write itself failed and only the log has the details.
    Salvaged { sidecar: Option<PathBuf> },
}

/// Result of converting one input item.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    /// Path of the written JPEG
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// How the metadata transplant went
    pub metadata: TransplantOutcome,
}

/// Cumulative progress emitted after each worker group joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Items completed so far (success or failure); never decreases
    pub completed: usize,
    /// Total items in the batch
    pub total: usize,
}

impl BatchProgress {
    /// Completion percentage, truncated to whole percent.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Totals for a finished batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    /// Items that produced an output file
    pub succeeded: usize,
    /// Items that failed and were skipped
    pub failed: usize,
    /// Items that were no-ops (unrecognized type, empty container)
    pub skipped: usize,
}
