//! Path utilities

use std::path::Path;

/// Check whether a path has the given extension, case-insensitively.
pub fn has_extension<P: AsRef<Path>>(path: P, ext: &str) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Lowercased base name of a path, with the extension stripped.
///
/// Returns `None` for paths with no file name component (e.g. `/` or `..`).
pub fn lowercase_stem<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
}
