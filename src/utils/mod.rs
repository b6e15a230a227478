//! Utility functions

pub mod path;
pub mod walk;

pub use path::{has_extension, lowercase_stem};
pub use walk::{collect_files, ensure_root, find_files_with_extension, move_file};
