#![forbid(unsafe_code)]

//! Golden-file recording for test suites.
//!
//! A [`Recorder`] persists the first payload a test produces as a baseline
//! file and compares every later run against it byte for byte. A mismatch
//! comes back as a structured error carrying both payloads and, when the
//! repository ships the diff visualizer template, a rendered side-by-side
//! document in a scratch artifact directory.
//!
//! # Locating baselines
//! Tests rarely run from a predictable working directory, so the baseline
//! directory is usually given as a repository-relative fragment such as
//! `test/recordings`. The recorder resolves it by walking upward from the
//! working directory until the fragment matches an existing path, which
//! makes the same test work from the repo root, a build directory, or an
//! IDE runner. The diff visualizer template is found the same way.
//!
//! # Example
//! ```no_run
//! use goldrec::{Recorder, StaticIdentity};
//!
//! fn check(observed: &str) -> goldrec::Result<()> {
//!     let mut recorder = Recorder::new(StaticIdentity::new("parser", "roundtrip"));
//!     recorder.set_recording_dir("test/recordings")?;
//!     recorder.record(observed)
//! }
//! ```

pub mod artifact;
pub mod error;
pub mod handler;
pub mod identity;
pub mod locate;
pub mod mismatch;
pub mod recorder;
pub mod store;

pub use artifact::{ArtifactAllocator, DEFAULT_ARTIFACT_PREFIX};
pub use error::{RecorderError, RecorderErrorClass, Result};
pub use handler::{MismatchHandler, VISUALIZER_ASSET};
pub use identity::{StaticIdentity, TestIdentity};
pub use locate::{resolve_upward, resolve_upward_from};
pub use mismatch::{MismatchInfo, MismatchReport, baseline_matches};
pub use recorder::Recorder;
pub use store::{RecordingStore, default_filename, read_recording, write_recording};
