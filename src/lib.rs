//! # texkit
//!
//! A pure-Rust library for game-asset housekeeping: finding textures across
//! large mod directory trees, batch-converting DDS ↔ PNG, and moving asset
//! files next to their matching descriptors.
//!
//! ## Operations
//!
//! - **Texture Locator** - find every directory containing a texture, by
//!   file name or by cross-referencing a folder of processed reference images
//! - **DDS/PNG Converter** - batch-convert textures in place, originals kept
//! - **Descriptor Matcher** - move `.fbx` assets into the directory of the
//!   `.xml` descriptor with the same base name
//!
//! Every operation is a single synchronous pass over the filesystem. Nothing
//! is cached between calls; the tree is re-enumerated each time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use texkit::prelude::*;
//!
//! // Find every directory containing "rock_diffuse" (any extension, any case)
//! let matches = locate_by_name("Mods/Original", "rock_diffuse.dds", |_| {})?;
//! for m in &matches {
//!     println!("{} in {}", m.display, m.directory.display());
//! }
//!
//! // Convert every DDS under a tree to PNG, alongside the originals
//! let result = convert_tree("Mods/Original", Direction::DdsToPng, |_| {})?;
//! println!("converted {} textures", result.success_count);
//! # Ok::<(), texkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default) - Enables the `texkit` command-line binary

pub mod converter;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod progress;
pub mod texture;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::converter::{ConvertResult, Direction, convert_tree};
    pub use crate::error::{Error, Result};
    pub use crate::locator::{LocateMode, MatchRecord, locate_by_folder_match, locate_by_name};
    pub use crate::matcher::{RelocateResult, relocate_assets};
    pub use crate::progress::{Phase, Progress};
    pub use crate::texture::{DdsFormat, dds_to_png, png_to_dds, png_to_dds_with_format};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
