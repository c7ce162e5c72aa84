//! The record-or-compare entry point.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::artifact::ArtifactAllocator;
use crate::error::{RecorderError, Result};
use crate::handler::MismatchHandler;
use crate::identity::TestIdentity;
use crate::mismatch::{self, MismatchInfo};
use crate::store::{self, RecordingStore};

/// Golden-file recorder: persists a baseline the first time a payload is
/// recorded and compares byte for byte on every later run.
///
/// A recorder is built per test with the identity of that test, pointed at
/// a baseline directory, and then driven through [`Recorder::record`]. The
/// first run writes the baseline and succeeds; later runs succeed only when
/// the payload still matches. On a mismatch the returned error carries a
/// [`crate::mismatch::MismatchReport`] with both payloads and the artifacts
/// written for inspection.
///
/// # Example
/// ```no_run
/// use goldrec::{Recorder, StaticIdentity};
///
/// fn check_parser_output(observed: &str) -> goldrec::Result<()> {
///     let mut recorder = Recorder::new(StaticIdentity::new("parser", "roundtrip"));
///     recorder.set_recording_dir("test/recordings")?;
///     recorder.record(observed)
/// }
/// ```
pub struct Recorder {
    identity: Box<dyn TestIdentity>,
    store: RecordingStore,
    allocator: ArtifactAllocator,
    handler: Option<MismatchHandler>,
}

impl Recorder {
    /// A recorder deriving default filenames from `identity`.
    #[must_use]
    pub fn new(identity: impl TestIdentity + 'static) -> Self {
        Self {
            identity: Box::new(identity),
            store: RecordingStore::new(),
            allocator: ArtifactAllocator::default(),
            handler: None,
        }
    }

    /// Start upward searches from `origin` instead of the process working
    /// directory.
    #[must_use]
    pub fn with_search_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.store.set_origin(origin.into());
        self
    }

    /// Allocate mismatch artifact directories with `allocator` instead of
    /// under the system temp root.
    #[must_use]
    pub fn with_allocator(mut self, allocator: ArtifactAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Configure the baseline directory. See
    /// [`RecordingStore::set_directory`].
    pub fn set_recording_dir(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        self.store.set_directory(directory)
    }

    /// Configure the baseline filename. See [`RecordingStore::set_filename`].
    pub fn set_recording_filename(&mut self, filename: &str) -> Result<()> {
        self.store.set_filename(filename)
    }

    /// Install a mismatch handler. Installing one before the first
    /// [`Recorder::record`] call means the visualizer search never runs.
    pub fn set_mismatch_handler(&mut self, handler: MismatchHandler) {
        self.handler = Some(handler);
    }

    /// The handler that will process the next mismatch, once decided.
    #[must_use]
    pub fn mismatch_handler(&self) -> Option<&MismatchHandler> {
        self.handler.as_ref()
    }

    /// Record `data`: create the baseline when absent, compare against it
    /// when present.
    ///
    /// Returns [`RecorderError::Mismatch`] when the comparison fails; every
    /// other error kind means the setup or environment is broken.
    pub fn record(&mut self, data: &str) -> Result<()> {
        if self.handler.is_none() {
            let origin = self.store.search_origin()?;
            self.handler = Some(MismatchHandler::select_from(&origin));
        }
        if self.store.directory().is_none() {
            return Err(RecorderError::config("recording directory not set"));
        }
        if self.store.filename().is_none() {
            let suite = self.identity.suite_name();
            let case = self.identity.case_name();
            let filename = store::default_filename(&suite, &case)?;
            debug!(filename = %filename, "Recording filename not set; deriving from test identity");
            self.store.install_derived_filename(filename);
        }
        let recording_path = self.store.full_path()?;

        if recording_path.exists() {
            debug!(path = ?recording_path, "Recording file already exists");
            self.compare(&recording_path, data)
        } else {
            debug!(path = ?recording_path, "Recording file does not exist; writing baseline");
            store::write_recording(&recording_path, data)
        }
    }

    /// Record `lines` as a single payload, every element followed by `\n`.
    pub fn record_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        let mut data = String::new();
        for line in lines {
            data.push_str(line.as_ref());
            data.push('\n');
        }
        self.record(&data)
    }

    fn compare(&self, recording_path: &Path, data: &str) -> Result<()> {
        let baseline = store::read_recording(recording_path)?;
        if mismatch::baseline_matches(data, &baseline) {
            debug!("No mismatch found");
            return Ok(());
        }
        debug!(path = ?recording_path, "Mismatch found");
        let artifact_dir = self.allocator.allocate()?;
        let handler = self
            .handler
            .as_ref()
            .ok_or_else(|| RecorderError::config("mismatch handler not set"))?;
        let info = MismatchInfo {
            recording_data: baseline,
            mismatch_data: data.to_owned(),
            mismatch_dir: artifact_dir,
            recording_path: recording_path.to_path_buf(),
        };
        let report = handler.handle(&info)?;
        Err(RecorderError::Mismatch(Box::new(report)))
    }
}
