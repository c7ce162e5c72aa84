//! Mismatch values and the baseline comparison.

use std::path::PathBuf;

/// Everything known about a mismatch at detection time.
///
/// Handed to the mismatch handler and dropped once the `record` call that
/// produced it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchInfo {
    /// Baseline content read back from disk.
    pub recording_data: String,
    /// Newly produced content that failed the comparison.
    pub mismatch_data: String,
    /// Artifact directory allocated for this mismatch.
    pub mismatch_dir: PathBuf,
    /// Path of the baseline file that was compared.
    pub recording_path: PathBuf,
}

/// The handler's account of a mismatch, carried inside the error returned
/// by `record`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    /// Baseline content read back from disk.
    pub recording_data: String,
    /// Newly produced content that failed the comparison.
    pub mismatch_data: String,
    /// Path of the baseline file that was compared.
    pub recording_path: PathBuf,
    /// Artifact directory allocated for this mismatch.
    pub artifact_dir: PathBuf,
    /// Rendered diff document, when the diff handler ran.
    pub rendered_diff: Option<PathBuf>,
    /// The raw mismatching payload persisted for inspection, when the diff
    /// handler ran.
    pub mismatch_payload: Option<PathBuf>,
}

/// Exact comparison between newly produced data and the stored baseline.
///
/// No trimming, no normalization. Anything cosmetic (trailing newlines,
/// volatile fields, key order) must be settled by the caller before
/// recording.
#[must_use]
pub fn baseline_matches(produced: &str, baseline: &str) -> bool {
    produced == baseline
}
