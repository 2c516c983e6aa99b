//! Input discovery: qualifying files in the input directory.

use std::path::Path;
use walkdir::WalkDir;

use crate::pipeline::classify::{base_name, classify};
use crate::types::{InputKind, SourceItem};

/// List qualifying inputs (containers and bitstream images) in the top
/// level of `input_dir`, sorted by path for deterministic ordering.
///
/// Standalone JPEGs need no conversion and are not picked up;
/// subdirectories are not descended into.
pub fn discover(input_dir: &Path) -> Vec<SourceItem> {
    let mut items = Vec::new();

    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.path().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let kind = classify(file_name);
        if matches!(kind, InputKind::Container | InputKind::Bitstream) {
            items.push(SourceItem {
                base_name: base_name(file_name).to_string(),
                path: entry.path().to_path_buf(),
                kind,
            });
        }
    }

    items.sort_by(|a, b| a.path.cmp(&b.path));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.heic", "a.livp", "c.HEIF", "notes.txt", "d.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let items = discover(dir.path());
        let names: Vec<_> = items.iter().map(|i| i.base_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(items[0].kind, InputKind::Container);
        assert_eq!(items[1].kind, InputKind::Bitstream);
    }

    #[test]
    fn test_discover_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/deep.heic"), b"x").unwrap();
        std::fs::write(dir.path().join("top.heic"), b"x").unwrap();

        let items = discover(dir.path());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].base_name, "top");
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_empty());
    }
}
