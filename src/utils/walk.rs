//! Directory traversal primitives
//!
//! All three operations share the same walk: recursive, symlink-following,
//! per-entry errors skipped, results sorted for deterministic output. The
//! tree is re-enumerated on every call; nothing is cached.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Validate a root path before any traversal begins.
///
/// # Errors
/// Returns [`Error::MissingInput`] if the path is empty and
/// [`Error::RootNotFound`] if it does not exist or is not a directory.
pub fn ensure_root(path: &Path, what: &'static str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::MissingInput { what });
    }
    if !path.is_dir() {
        return Err(Error::RootNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Collect every file under a root recursively.
///
/// Symlinks are followed; walkdir reports loops as per-entry errors, which
/// are skipped along with unreadable entries. The list is sorted.
pub fn collect_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Find all files with the given extension (case-insensitive) under a root.
///
/// # Arguments
/// * `root` - Directory to search
/// * `extension` - Extension without the leading dot (e.g. `"dds"`)
///
/// # Returns
/// A sorted list of matching file paths.
pub fn find_files_with_extension<P: AsRef<Path>>(root: P, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Move a file, falling back to copy + remove when rename fails
/// (e.g. across filesystems).
///
/// # Errors
/// Returns an error if both the rename and the copy fail. A partially
/// copied destination is removed before the error is returned.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if std::fs::rename(src, dest).is_ok() {
        return Ok(());
    }

    match std::fs::copy(src, dest) {
        Ok(_) => {
            std::fs::remove_file(src)?;
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::remove_file(dest);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_ensure_root_rejects_empty_and_missing() {
        assert!(matches!(
            ensure_root(Path::new(""), "root folder"),
            Err(Error::MissingInput { .. })
        ));
        assert!(matches!(
            ensure_root(Path::new("/no/such/texkit/dir"), "root folder"),
            Err(Error::RootNotFound { .. })
        ));
    }

    #[test]
    fn test_find_files_with_extension_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.DDS"), b"x").unwrap();
        fs::write(dir.path().join("sub/a.dds"), b"x").unwrap();
        fs::write(dir.path().join("c.png"), b"x").unwrap();

        let found = find_files_with_extension(dir.path(), "dds");
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("b.DDS"));
        assert!(found[1].ends_with("sub/a.dds"));
    }

    #[test]
    fn test_move_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.fbx");
        let dest = dir.path().join("b.fbx");
        fs::write(&src, b"mesh").unwrap();

        move_file(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"mesh");
    }
}
