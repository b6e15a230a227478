//! CLI progress display utilities

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::progress::Progress;

/// Magnifying glass - for search operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Picture - for texture conversion
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");
/// Truck - for moving files around
pub static TRUCK: Emoji<'_, '_> = Emoji("🚚 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step header: `🔍 Searching original textures...`
pub fn print_step(emoji: Emoji, msg: &str) {
    println!("{emoji}{}", style(msg).bold());
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{SPARKLE} Done in {}", HumanDuration(elapsed));
}

/// Progress bar for batch file operations
///
/// The total is unknown until the operation has enumerated the tree, so the
/// bar starts at zero length and is sized by [`update_bar`] on the first
/// callback.
///
/// # Panics
/// Panics if the template string is invalid (it is a constant).
#[must_use]
pub fn file_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .expect("valid template")
            .progress_chars("##-"),
    );
    pb
}

/// Feed one core progress update into an indicatif bar
pub fn update_bar(pb: &ProgressBar, progress: &Progress) {
    pb.set_length(progress.total as u64);
    pb.set_position(progress.current as u64);
    pb.set_message(match &progress.current_file {
        Some(file) => format!("{} {file}", progress.phase.as_str()),
        None => progress.phase.as_str().to_string(),
    });
}
