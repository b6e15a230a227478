//! Batch texture conversion
//!
//! Walks a tree and re-encodes every texture of the source format as the
//! target format, writing the new file alongside the original. Originals are
//! never deleted or modified. A file that fails to decode or encode is
//! logged, recorded and skipped; one corrupt texture never aborts the batch.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::progress::{Phase, Progress};
use crate::texture;
use crate::utils::{ensure_root, find_files_with_extension};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Decode `.dds` textures and write `.png` siblings
    DdsToPng,
    /// Decode `.png` images and write `.dds` siblings (BC3)
    PngToDds,
}

impl Direction {
    /// Extension of the files picked up by this direction
    #[must_use]
    pub fn source_ext(self) -> &'static str {
        match self {
            Direction::DdsToPng => "dds",
            Direction::PngToDds => "png",
        }
    }

    /// Extension written by this direction
    #[must_use]
    pub fn target_ext(self) -> &'static str {
        match self {
            Direction::DdsToPng => "png",
            Direction::PngToDds => "dds",
        }
    }
}

/// Result of a batch conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Number of files converted
    pub success_count: usize,
    /// Number of files that failed to decode or encode
    pub fail_count: usize,
    /// One message per file processed
    pub results: Vec<String>,
}

/// Convert every texture of the source format under `root`.
///
/// Each converted file keeps its base name and directory, with the target
/// extension. A direction only ever matches one extension, so a conversion
/// can never land on its own source path.
///
/// # Errors
/// Returns [`crate::Error::RootNotFound`] if the root does not exist.
/// Per-file decode/encode failures are contained: they are logged at `warn`,
/// counted in `fail_count` and the batch continues.
pub fn convert_tree<P, F>(root: P, direction: Direction, mut progress: F) -> Result<ConvertResult>
where
    P: AsRef<Path>,
    F: FnMut(&Progress),
{
    let root = root.as_ref();
    ensure_root(root, "conversion folder")?;

    let sources = find_files_with_extension(root, direction.source_ext());
    let total = sources.len();
    debug!(total, ?direction, "starting batch conversion");

    let mut success_count = 0;
    let mut fail_count = 0;
    let mut results = Vec::with_capacity(total);

    for (i, source) in sources.iter().enumerate() {
        let rel_display = source
            .strip_prefix(root)
            .unwrap_or(source)
            .to_string_lossy();
        progress(&Progress::with_file(
            Phase::Converting,
            i + 1,
            total,
            rel_display.to_string(),
        ));

        let dest = source.with_extension(direction.target_ext());
        let outcome = match direction {
            Direction::DdsToPng => texture::dds_to_png(source, &dest),
            Direction::PngToDds => texture::png_to_dds(source, &dest),
        };

        match outcome {
            Ok(()) => {
                success_count += 1;
                results.push(format!("Converted: {rel_display}"));
            }
            Err(e) => {
                fail_count += 1;
                warn!(file = %rel_display, error = %e, "skipping file that failed to convert");
                results.push(format!("Failed {rel_display}: {e}"));
            }
        }
    }

    Ok(ConvertResult {
        success_count,
        fail_count,
        results,
    })
}
