//! Mirror a source subtree location into a destination tree.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Recreate the location of `source_item` relative to `source_root` under
/// `dest_root`.
///
/// The roots are directories; `source_item` may be a file or a directory and
/// must be `source_root` itself or one of its descendants. No filesystem
/// access is performed.
pub fn path_delta(source_root: &Path, source_item: &Path, dest_root: &Path) -> Result<PathBuf> {
    let relative = source_item
        .strip_prefix(source_root)
        .map_err(|_| ExtractError::PathResolution {
            root: source_root.to_path_buf(),
            item: source_item.to_path_buf(),
        })?;
    Ok(dest_root.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_directly_under_root() {
        let out = path_delta(Path::new("in"), Path::new("in/a.pdf"), Path::new("out")).unwrap();
        assert_eq!(out, PathBuf::from("out/a.pdf"));
    }

    #[test]
    fn test_nested_structure_preserved() {
        let out = path_delta(
            Path::new("/data/src"),
            Path::new("/data/src/2024/11/report.pdf"),
            Path::new("/tmp/dest"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/tmp/dest/2024/11/report.pdf"));
        assert_eq!(
            out.strip_prefix("/tmp/dest").unwrap(),
            Path::new("2024/11/report.pdf")
        );
    }

    #[test]
    fn test_root_maps_to_dest_root() {
        let out = path_delta(Path::new("src"), Path::new("src"), Path::new("dest")).unwrap();
        assert_eq!(out, PathBuf::from("dest"));
    }

    #[test]
    fn test_sub_directory() {
        let out = path_delta(Path::new("src"), Path::new("src/sub"), Path::new("dest")).unwrap();
        assert_eq!(out, PathBuf::from("dest/sub"));
    }

    #[test]
    fn test_item_outside_root() {
        let err = path_delta(
            Path::new("/data/src"),
            Path::new("/data/other/a.pdf"),
            Path::new("/tmp/dest"),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::PathResolution { .. }));
    }

    #[test]
    fn test_sibling_with_common_prefix_is_outside() {
        // Component-wise, "srcx" is not under "src".
        let err = path_delta(Path::new("src"), Path::new("srcx/a.pdf"), Path::new("dest"));
        assert!(err.is_err());
    }
}
