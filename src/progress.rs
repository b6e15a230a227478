//! Progress reporting for batch operations
//!
//! Every batch operation takes a plain `FnMut(&Progress)` callback which is
//! invoked synchronously, once per file, on the calling thread. It is an
//! observability hook only - operations complete fully regardless of what
//! the callback does with the updates.

/// Current operation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Walking the tree looking for matches
    Scanning,
    /// Decoding and re-encoding texture files
    Converting,
    /// Building the descriptor index
    Indexing,
    /// Moving asset files next to their descriptors
    Relocating,
}

impl Phase {
    /// Human-readable phase label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Scanning => "Scanning",
            Phase::Converting => "Converting",
            Phase::Indexing => "Indexing",
            Phase::Relocating => "Relocating",
        }
    }
}

/// A single progress update
#[derive(Debug, Clone)]
pub struct Progress {
    /// Current operation phase
    pub phase: Phase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl Progress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: Phase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file name
    #[must_use]
    pub fn with_file(phase: Phase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress fraction (0.0 - 1.0)
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert!((Progress::new(Phase::Scanning, 1, 4).fraction() - 0.25).abs() < f64::EPSILON);
        assert!((Progress::new(Phase::Scanning, 0, 0).fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_file() {
        let p = Progress::with_file(Phase::Converting, 2, 10, "tex.dds");
        assert_eq!(p.current_file.as_deref(), Some("tex.dds"));
        assert_eq!(p.phase.as_str(), "Converting");
    }
}
