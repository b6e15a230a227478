//! Descriptor Matcher
//!
//! Moves asset files next to the descriptor that describes them. Two passes
//! over the tree: first index every `.xml` descriptor's directory by base
//! name, then move every `.fbx` file whose base name is indexed into that
//! directory.
//!
//! The index is case-insensitive and last-write-wins: if the same base name
//! has descriptors in several directories, only the last one seen keeps it.
//! No conflict detection is attempted; that is the historical behavior of
//! the tool this replaces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::progress::{Phase, Progress};
use crate::utils::{ensure_root, find_files_with_extension, lowercase_stem, move_file};

/// Extension marking a descriptor file
const DESCRIPTOR_EXT: &str = "xml";
/// Extension marking the asset files being organized
const ASSET_EXT: &str = "fbx";

/// Result of a relocation run
#[derive(Debug, Clone, Serialize)]
pub struct RelocateResult {
    /// Number of files moved
    pub moved_count: usize,
    /// Number of moves skipped because the destination already existed
    pub skipped_conflicts: usize,
    /// One message per file moved or skipped
    pub results: Vec<String>,
}

/// Move every `.fbx` file under `root` into the directory of the `.xml`
/// descriptor with the same base name.
///
/// Files already co-located with their descriptor are left alone, so a
/// second run over the same tree moves nothing. A destination that is
/// already occupied by another file is never overwritten; the move is
/// skipped and counted in `skipped_conflicts`.
///
/// # Errors
/// Returns [`crate::Error::RootNotFound`] if the root does not exist, or an
/// IO error if a move fails outright.
pub fn relocate_assets<P, F>(root: P, mut progress: F) -> Result<RelocateResult>
where
    P: AsRef<Path>,
    F: FnMut(&Progress),
{
    let root = root.as_ref();
    ensure_root(root, "root folder")?;

    // Pass 1: base name -> descriptor directory, last write wins
    let descriptors = find_files_with_extension(root, DESCRIPTOR_EXT);
    let mut index: HashMap<String, PathBuf> = HashMap::new();
    let total = descriptors.len();
    for (i, path) in descriptors.iter().enumerate() {
        progress(&Progress::with_file(
            Phase::Indexing,
            i + 1,
            total,
            path.to_string_lossy(),
        ));
        if let (Some(stem), Some(dir)) = (lowercase_stem(path), path.parent()) {
            index.insert(stem, dir.to_path_buf());
        }
    }
    debug!(descriptors = index.len(), "descriptor index built");

    // Pass 2: move matching assets
    let assets = find_files_with_extension(root, ASSET_EXT);
    let total = assets.len();

    let mut moved_count = 0;
    let mut skipped_conflicts = 0;
    let mut results = Vec::new();

    for (i, path) in assets.iter().enumerate() {
        let rel_display = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
        progress(&Progress::with_file(
            Phase::Relocating,
            i + 1,
            total,
            rel_display.to_string(),
        ));

        let Some(stem) = lowercase_stem(path) else {
            continue;
        };
        let Some(target_dir) = index.get(&stem) else {
            continue;
        };
        let Some(file_name) = path.file_name() else {
            continue;
        };

        let dest = target_dir.join(file_name);
        if &dest == path {
            // Already next to its descriptor
            continue;
        }
        if dest.exists() {
            skipped_conflicts += 1;
            warn!(file = %rel_display, dest = %dest.display(), "destination occupied, not overwriting");
            results.push(format!("Skipped {rel_display}: destination occupied"));
            continue;
        }

        move_file(path, &dest)?;
        moved_count += 1;
        results.push(format!("Moved: {rel_display} -> {}", dest.display()));
    }

    Ok(RelocateResult {
        moved_count,
        skipped_conflicts,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_index_is_case_insensitive_and_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("d1")).unwrap();
        fs::create_dir_all(dir.path().join("d2")).unwrap();
        fs::write(dir.path().join("d1/Foo.xml"), b"<a/>").unwrap();
        fs::write(dir.path().join("d2/foo.XML"), b"<a/>").unwrap();
        fs::write(dir.path().join("FOO.fbx"), b"mesh").unwrap();

        let result = relocate_assets(dir.path(), |_| {}).unwrap();
        assert_eq!(result.moved_count, 1);
        // d1/Foo.xml sorts before d2/foo.XML, so d2 wins the index
        assert!(dir.path().join("d2/FOO.fbx").exists());
        assert!(!dir.path().join("FOO.fbx").exists());
    }

    #[test]
    fn test_unmatched_assets_stay_put() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("orphan.fbx"), b"mesh").unwrap();

        let result = relocate_assets(dir.path(), |_| {}).unwrap();
        assert_eq!(result.moved_count, 0);
        assert!(dir.path().join("orphan.fbx").exists());
    }
}
