//! Source-unit deduplication
//!
//! The engine is stateless about which units it has seen; the calling
//! side consults a [`SeenSet`] before feeding a unit's facts. Two
//! implementations: an in-memory set for single runs, and a marker-file
//! directory that persists across runs (the log directory doubles as
//! this).

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Deduplication keyed by source-unit identity
pub trait SeenSet {
    /// Returns true if the unit was already processed, marking it
    /// otherwise
    fn check_and_mark(&mut self, unit: &str) -> Result<bool>;
}

/// Per-run, in-memory seen set
#[derive(Debug, Default)]
pub struct MemorySeenSet {
    seen: HashSet<String>,
}

impl MemorySeenSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenSet for MemorySeenSet {
    fn check_and_mark(&mut self, unit: &str) -> Result<bool> {
        Ok(!self.seen.insert(unit.to_string()))
    }
}

/// Marker files under a directory; persists across runs
#[derive(Debug)]
pub struct DirSeenSet {
    root: PathBuf,
}

impl DirSeenSet {
    /// Open or create the marker directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create seen-set directory {}", root.display()))?;
        Ok(Self { root })
    }

    /// Marker path for a unit; path separators flatten to one file name
    fn marker_path(&self, unit: &str) -> PathBuf {
        let sanitized: String = unit
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.root.join(format!("{}.seen", sanitized))
    }
}

impl SeenSet for DirSeenSet {
    fn check_and_mark(&mut self, unit: &str) -> Result<bool> {
        let marker = self.marker_path(unit);
        if marker.exists() {
            return Ok(true);
        }
        fs::write(&marker, unit)
            .with_context(|| format!("Failed to write seen marker {}", marker.display()))?;
        Ok(false)
    }
}
