//! Extension-based classification of inputs and container entries.

use crate::types::InputKind;

/// Extensions of the live-photo container format.
pub const CONTAINER_EXTENSIONS: &[&str] = &[".livp"];

/// Extensions of the HEIF bitstream format.
pub const BITSTREAM_EXTENSIONS: &[&str] = &[".heif", ".heic"];

/// Extensions of the baseline JPEG format.
pub const BASELINE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Check whether `file_name` ends in any of `extensions`,
/// case-insensitively.
///
/// Pure function; extensions are expected with their leading dot.
pub fn is_file_type(file_name: &str, extensions: &[&str]) -> bool {
    // Byte-wise comparison: extensions are ASCII, and slicing bytes
    // avoids char-boundary panics on non-ASCII filenames.
    let name = file_name.as_bytes();
    extensions.iter().any(|ext| {
        name.len() >= ext.len()
            && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
    })
}

/// Classify a filename into an [`InputKind`].
pub fn classify(file_name: &str) -> InputKind {
    if is_file_type(file_name, CONTAINER_EXTENSIONS) {
        InputKind::Container
    } else if is_file_type(file_name, BITSTREAM_EXTENSIONS) {
        InputKind::Bitstream
    } else if is_file_type(file_name, BASELINE_EXTENSIONS) {
        InputKind::Baseline
    } else {
        InputKind::Unrecognized
    }
}

/// Filename without its final extension, used for output naming.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_supported_extensions_any_case() {
        for name in [
            "a.livp", "a.LIVP", "a.Livp", "b.heif", "b.HEIF", "c.heic", "c.HeiC",
        ] {
            assert!(
                is_file_type(name, CONTAINER_EXTENSIONS)
                    || is_file_type(name, BITSTREAM_EXTENSIONS),
                "{name} should classify as a supported input"
            );
        }
    }

    #[test]
    fn test_rejects_unrelated_suffixes() {
        assert!(!is_file_type("photo.png", BITSTREAM_EXTENSIONS));
        assert!(!is_file_type("photo.heic.txt", BITSTREAM_EXTENSIONS));
        assert!(!is_file_type("archive.zip", CONTAINER_EXTENSIONS));
    }

    #[test]
    fn test_rejects_names_shorter_than_extension() {
        assert!(!is_file_type("if", BITSTREAM_EXTENSIONS));
        assert!(!is_file_type("", CONTAINER_EXTENSIONS));
        // Exactly the extension itself still matches
        assert!(is_file_type(".heic", BITSTREAM_EXTENSIONS));
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(classify("live.livp"), InputKind::Container);
        assert_eq!(classify("shot.HEIC"), InputKind::Bitstream);
        assert_eq!(classify("old.jpeg"), InputKind::Baseline);
        assert_eq!(classify("clip.mov"), InputKind::Unrecognized);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("IMG_0001.livp"), "IMG_0001");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("noext"), "noext");
    }
}
