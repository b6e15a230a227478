//! Texture Locator
//!
//! Finds the directories under an "original" texture tree that contain a
//! given texture. Two modes: look up a literal file name, or cross-reference
//! a folder of already-processed reference images and report every original
//! texture with a matching base name.
//!
//! All comparisons are case-insensitive and ignore extensions, so
//! `Rock_Diffuse.DDS` matches a search for `rock_diffuse.png`. Pure read:
//! the locator never touches the tree it searches.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::progress::{Phase, Progress};
use crate::utils::{collect_files, ensure_root, has_extension, lowercase_stem};

/// Extension of processed reference images
const REFERENCE_EXT: &str = "png";
/// Extension of original textures compared against the reference folder
const ORIGINAL_EXT: &str = "dds";

/// How the locator resolves its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateMode {
    /// Search for a literal file name
    ByName,
    /// Cross-reference a folder of processed reference images
    ByFolderMatch,
}

/// One located match: what matched, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Display text: the matched file name, or `"reference -> matched"`
    /// for folder matches
    pub display: String,
    /// Directory containing the matched file
    pub directory: PathBuf,
}

/// Find every file under `original_root` whose base name equals
/// `target_filename` (extension stripped, case-insensitive).
///
/// One [`MatchRecord`] is emitted per matching file, so a directory holding
/// several matches is reported once per match. Records are sorted by display
/// text, case-insensitively.
///
/// # Errors
/// Returns [`Error::MissingInput`] if the target name is blank, and
/// [`Error::RootNotFound`] if the root does not exist.
pub fn locate_by_name<P, F>(
    original_root: P,
    target_filename: &str,
    mut progress: F,
) -> Result<Vec<MatchRecord>>
where
    P: AsRef<Path>,
    F: FnMut(&Progress),
{
    let root = original_root.as_ref();
    ensure_root(root, "original folder")?;

    let target = lowercase_stem(target_filename.trim()).unwrap_or_default();
    if target.is_empty() {
        return Err(Error::MissingInput {
            what: "texture name",
        });
    }

    let files = collect_files(root);
    let total = files.len();

    let mut matches = Vec::new();
    for (i, path) in files.iter().enumerate() {
        progress(&Progress::with_file(
            Phase::Scanning,
            i + 1,
            total,
            path.to_string_lossy(),
        ));

        if lowercase_stem(path).as_deref() != Some(target.as_str()) {
            continue;
        }
        let Some(dir) = path.parent() else { continue };
        matches.push(MatchRecord {
            display: path.file_name().unwrap_or_default().to_string_lossy().to_string(),
            directory: dir.to_path_buf(),
        });
    }

    sort_records(&mut matches);
    Ok(matches)
}

/// Cross-reference `original_root` against a folder of processed reference
/// images.
///
/// Reference names are taken from the files directly inside `reference_root`
/// with the `.png` extension (the reference folder is flat by convention and
/// is not walked recursively). Every `.dds` file under `original_root` whose
/// base name appears among the references emits a record pairing the two
/// names, e.g. `"tex1.png -> tex1.dds"`.
///
/// # Errors
/// Returns [`Error::RootNotFound`] if either root does not exist.
pub fn locate_by_folder_match<P, Q, F>(
    original_root: P,
    reference_root: Q,
    mut progress: F,
) -> Result<Vec<MatchRecord>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Progress),
{
    let root = original_root.as_ref();
    ensure_root(root, "original folder")?;
    let reference = reference_root.as_ref();
    ensure_root(reference, "processed folder")?;

    // base name -> reference file name, last write wins
    let mut references: HashMap<String, String> = HashMap::new();
    for entry in std::fs::read_dir(reference)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, REFERENCE_EXT) {
            continue;
        }
        if let (Some(stem), Some(name)) = (lowercase_stem(&path), path.file_name()) {
            references.insert(stem, name.to_string_lossy().to_string());
        }
    }

    let files = collect_files(root);
    let total = files.len();

    let mut matches = Vec::new();
    for (i, path) in files.iter().enumerate() {
        progress(&Progress::with_file(
            Phase::Scanning,
            i + 1,
            total,
            path.to_string_lossy(),
        ));

        if !has_extension(path, ORIGINAL_EXT) {
            continue;
        }
        let Some(stem) = lowercase_stem(path) else {
            continue;
        };
        let Some(reference_name) = references.get(&stem) else {
            continue;
        };
        let Some(dir) = path.parent() else { continue };
        matches.push(MatchRecord {
            display: format!(
                "{reference_name} -> {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            ),
            directory: dir.to_path_buf(),
        });
    }

    sort_records(&mut matches);
    Ok(matches)
}

/// Sort records by display text, case-insensitively
fn sort_records(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| {
        a.display
            .to_lowercase()
            .cmp(&b.display.to_lowercase())
            .then_with(|| a.directory.cmp(&b.directory))
    });
}
