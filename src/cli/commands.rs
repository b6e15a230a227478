//! Command definitions and execution

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Subcommand, ValueEnum};

use crate::converter::{Direction, convert_tree};
use crate::locator::{LocateMode, MatchRecord, locate_by_folder_match, locate_by_name};
use crate::matcher::relocate_assets;
use crate::progress::Progress;

use super::progress::{LOOKING_GLASS, PICTURE, TRUCK, file_bar, print_done, print_step, update_bar};

/// Target format for batch conversion
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetFormat {
    /// Convert DDS textures to PNG
    Png,
    /// Convert PNG images to DDS (BC3)
    Dds,
}

impl From<TargetFormat> for Direction {
    fn from(value: TargetFormat) -> Self {
        match value {
            TargetFormat::Png => Direction::DdsToPng,
            TargetFormat::Dds => Direction::PngToDds,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find directories containing a texture
    Locate {
        /// Original textures folder to search
        #[arg(short, long)]
        root: PathBuf,

        /// Texture file name to search for (extension and case are ignored)
        #[arg(short, long, conflicts_with = "reference")]
        name: Option<String>,

        /// Folder of processed reference images to cross-reference
        #[arg(long, conflicts_with = "name")]
        reference: Option<PathBuf>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Batch-convert textures under a folder, writing next to the originals
    Convert {
        /// Folder to convert
        #[arg(short, long)]
        root: PathBuf,

        /// Target format
        #[arg(short, long)]
        to: TargetFormat,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Move .fbx assets into the folder of the matching .xml descriptor
    Organize {
        /// Root folder to organize
        #[arg(short, long)]
        root: PathBuf,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if required inputs are missing or the underlying
    /// operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Locate {
                root,
                name,
                reference,
                json,
                quiet,
            } => locate(root, name.as_deref(), reference.as_deref(), *json, *quiet),
            Commands::Convert { root, to, quiet } => convert(root, (*to).into(), *quiet),
            Commands::Organize { root, quiet } => organize(root, *quiet),
        }
    }
}

fn locate(
    root: &Path,
    name: Option<&str>,
    reference: Option<&Path>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mode = match (name, reference) {
        (Some(_), _) => LocateMode::ByName,
        (None, Some(_)) => LocateMode::ByFolderMatch,
        (None, None) => {
            anyhow::bail!("missing input: provide --name <file> or --reference <folder>")
        }
    };

    if !quiet {
        print_step(LOOKING_GLASS, "Searching original textures...");
    }
    let started = Instant::now();
    let pb = if quiet { None } else { Some(file_bar()) };
    let on_progress = |p: &Progress| {
        if let Some(pb) = &pb {
            update_bar(pb, p);
        }
    };

    let matches = match mode {
        LocateMode::ByName => {
            // Presence checked above
            let name = name.unwrap_or_default();
            locate_by_name(root, name, on_progress)?
        }
        LocateMode::ByFolderMatch => {
            let reference = reference.unwrap_or_else(|| Path::new(""));
            locate_by_folder_match(root, reference, on_progress)?
        }
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    render_matches(&matches);
    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}

fn render_matches(matches: &[MatchRecord]) {
    if matches.is_empty() {
        println!("No matches found");
        return;
    }
    println!("Matching folders:");
    for m in matches {
        println!("  {}  ({})", m.directory.display(), m.display);
    }
    println!();
    println!("{} match(es)", matches.len());
}

fn convert(root: &Path, direction: Direction, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        print_step(
            PICTURE,
            &format!(
                "Converting {} -> {}...",
                direction.source_ext(),
                direction.target_ext()
            ),
        );
    }
    let started = Instant::now();
    let pb = if quiet { None } else { Some(file_bar()) };

    let result = convert_tree(root, direction, |p| {
        if let Some(pb) = &pb {
            update_bar(pb, p);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!("Conversion complete:");
    println!("  Converted: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);
    if result.fail_count > 0 {
        println!();
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
    }
    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}

fn organize(root: &Path, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        print_step(TRUCK, "Moving assets next to their descriptors...");
    }
    let started = Instant::now();
    let pb = if quiet { None } else { Some(file_bar()) };

    let result = relocate_assets(root, |p| {
        if let Some(pb) = &pb {
            update_bar(pb, p);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!("Organize complete:");
    println!("  Moved: {}", result.moved_count);
    if result.skipped_conflicts > 0 {
        println!("  Skipped (destination occupied): {}", result.skipped_conflicts);
    }
    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}
