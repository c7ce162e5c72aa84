//! Mismatch artifact directory allocation.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{RecorderError, Result};

/// Prefix for allocated directory names under the system temp root.
pub const DEFAULT_ARTIFACT_PREFIX: &str = "goldrec-mismatch";

/// Allocates numbered scratch directories for mismatch artifacts.
///
/// Directories are named `<prefix>-<n>` with the first free `n`, one per
/// mismatch, and are never cleaned up, so artifacts stay around for
/// inspection after the test run exits.
#[derive(Debug, Clone)]
pub struct ArtifactAllocator {
    root: PathBuf,
    prefix: String,
}

impl Default for ArtifactAllocator {
    fn default() -> Self {
        Self {
            root: env::temp_dir(),
            prefix: DEFAULT_ARTIFACT_PREFIX.to_owned(),
        }
    }
}

impl ArtifactAllocator {
    /// Allocate under `root` with directory names starting with `prefix`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Create and return the next free `<prefix>-<n>` directory.
    ///
    /// Probing and creation are not atomic. When another process claims the
    /// probed name first, creation fails and the error propagates instead
    /// of retrying, so the race surfaces instead of being absorbed.
    pub fn allocate(&self) -> Result<PathBuf> {
        let mut index = 0usize;
        let mut candidate = self.root.join(format!("{}-{index}", self.prefix));
        while candidate.exists() {
            index += 1;
            candidate = self.root.join(format!("{}-{index}", self.prefix));
        }
        fs::create_dir(&candidate).map_err(|source| RecorderError::io(&candidate, source))?;
        Ok(candidate)
    }
}
