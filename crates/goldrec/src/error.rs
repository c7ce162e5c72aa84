//! Failure taxonomy for the recorder.
//!
//! Exactly one kind of failure is routine: a recorded payload that differs
//! from its baseline. Everything else (bad configuration, an exhausted path
//! search, a filesystem refusal) means the surrounding test setup is broken
//! and should stop the run rather than count as a test result.

use std::path::PathBuf;

use thiserror::Error;

use crate::mismatch::MismatchReport;

pub type Result<T> = std::result::Result<T, RecorderError>;

/// Broad failure classification for callers that route on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderErrorClass {
    /// Recorder misconfiguration or invalid caller input.
    Config,
    /// An upward path search exhausted every ancestor directory.
    NotFound,
    /// Recorded data differs from the stored baseline.
    Mismatch,
    /// The filesystem refused a read, write, or create.
    FatalIo,
}

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("invalid recorder configuration: {message}")]
    Config { message: String },

    #[error(
        "could not find `{fragment}` in the start directory or any ancestor; searched:\n{}",
        list_candidates(.searched)
    )]
    NotFound {
        fragment: PathBuf,
        searched: Vec<PathBuf>,
    },

    #[error(
        "recorded data does not match the baseline at {}",
        .0.recording_path.display()
    )]
    Mismatch(Box<MismatchReport>),

    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecorderError {
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn class(&self) -> RecorderErrorClass {
        match self {
            Self::Config { .. } => RecorderErrorClass::Config,
            Self::NotFound { .. } => RecorderErrorClass::NotFound,
            Self::Mismatch(_) => RecorderErrorClass::Mismatch,
            Self::Io { .. } => RecorderErrorClass::FatalIo,
        }
    }

    /// Whether this failure is the routine record-vs-baseline outcome rather
    /// than a setup or environment problem.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    /// The mismatch report, when this error carries one.
    #[must_use]
    pub fn mismatch_report(&self) -> Option<&MismatchReport> {
        match self {
            Self::Mismatch(report) => Some(report),
            _ => None,
        }
    }
}

fn list_candidates(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|candidate| format!("  {}", candidate.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
