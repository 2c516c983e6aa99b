//! Live-photo container unwrapping.
//!
//! A `.livp` bundle is a zip archive holding a primary image (HEIF or
//! JPEG) next to a motion clip. Only the primary image matters here;
//! the clip is never extracted.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::PipelineError;
use crate::pipeline::classify::{is_file_type, BASELINE_EXTENSIONS, BITSTREAM_EXTENSIONS};

/// Which image flavor a container entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// HEIF/HEIC entry; needs the full decode-encode path
    Bitstream,
    /// JPEG entry; copied verbatim
    Baseline,
}

/// The primary-image payload extracted from a container.
#[derive(Debug)]
pub struct SelectedPayload {
    pub kind: PayloadKind,
    pub entry_name: String,
    pub bytes: Vec<u8>,
}

/// Open a container file for unwrapping.
pub fn open(path: &Path) -> Result<ZipArchive<File>, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::Container {
        path: path.to_path_buf(),
        message: format!("Cannot open container: {e}"),
    })?;
    ZipArchive::new(file).map_err(|e| PipelineError::Container {
        path: path.to_path_buf(),
        message: format!("Not a readable zip archive: {e}"),
    })
}

/// Scan entries in native index order and extract the first qualifying
/// primary image.
///
/// Whichever image entry appears first in the index wins; scanning
/// stops there. Returns `None` when the container holds no image entry
/// at all.
pub fn select_payload<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    container_path: &Path,
) -> Result<Option<SelectedPayload>, PipelineError> {
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| PipelineError::Container {
                path: container_path.to_path_buf(),
                message: format!("Cannot read entry {index}: {e}"),
            })?;
        let name = entry.name().to_string();

        let kind = if is_file_type(&name, BITSTREAM_EXTENSIONS) {
            PayloadKind::Bitstream
        } else if is_file_type(&name, BASELINE_EXTENSIONS) {
            PayloadKind::Baseline
        } else {
            continue;
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| PipelineError::Container {
                path: container_path.to_path_buf(),
                message: format!("Cannot extract entry {name:?}: {e}"),
            })?;

        return Ok(Some(SelectedPayload {
            kind,
            entry_name: name,
            bytes,
        }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(bytes).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_selects_first_bitstream_entry() {
        let cursor = build_zip(&[
            ("clip.mov", b"movie bytes"),
            ("photo.heic", b"heic bytes"),
            ("photo.jpg", b"jpeg bytes"),
        ]);
        let mut archive = ZipArchive::new(cursor).unwrap();

        let payload = select_payload(&mut archive, Path::new("live.livp"))
            .unwrap()
            .unwrap();
        assert_eq!(payload.kind, PayloadKind::Bitstream);
        assert_eq!(payload.entry_name, "photo.heic");
        assert_eq!(payload.bytes, b"heic bytes");
    }

    #[test]
    fn test_falls_back_to_baseline_entry() {
        let cursor = build_zip(&[("clip.mov", b"movie"), ("photo.JPG", b"jpeg bytes")]);
        let mut archive = ZipArchive::new(cursor).unwrap();

        let payload = select_payload(&mut archive, Path::new("live.livp"))
            .unwrap()
            .unwrap();
        assert_eq!(payload.kind, PayloadKind::Baseline);
        assert_eq!(payload.bytes, b"jpeg bytes");
    }

    #[test]
    fn test_no_qualifying_entry() {
        let cursor = build_zip(&[("clip.mov", b"movie"), ("notes.txt", b"text")]);
        let mut archive = ZipArchive::new(cursor).unwrap();

        let payload = select_payload(&mut archive, Path::new("live.livp")).unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn test_empty_container() {
        let cursor = build_zip(&[]);
        let mut archive = ZipArchive::new(cursor).unwrap();
        assert!(select_payload(&mut archive, Path::new("live.livp"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.livp");
        std::fs::write(&path, b"not a zip at all").unwrap();

        let err = open(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Container { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let err = open(Path::new("/nonexistent/a.livp")).unwrap_err();
        assert!(matches!(err, PipelineError::Container { .. }));
    }
}
