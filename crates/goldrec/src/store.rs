//! Baseline location and byte-exact recording I/O.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RecorderError, Result};
use crate::locate;

/// Where the baseline lives.
///
/// Directory and filename are each set at most once. The directory is
/// resolved to a concrete path at set time; the filename may instead be
/// derived from the test identity on first record.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    origin: Option<PathBuf>,
    directory: Option<PathBuf>,
    filename: Option<String>,
}

impl RecordingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose upward searches start from `origin` instead of the
    /// process working directory.
    #[must_use]
    pub fn with_origin(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: Some(origin.into()),
            ..Self::default()
        }
    }

    pub(crate) fn set_origin(&mut self, origin: PathBuf) {
        self.origin = Some(origin);
    }

    /// Configure the baseline directory.
    ///
    /// Relative paths are resolved by searching upward from the origin, see
    /// [`crate::locate::resolve_upward_from`]; absolute paths are taken
    /// verbatim. Setting a directory twice is an error.
    pub fn set_directory(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        let directory = directory.as_ref();
        if self.directory.is_some() {
            return Err(RecorderError::config("recording directory already set"));
        }
        if directory.as_os_str().is_empty() {
            return Err(RecorderError::config("recording directory must not be empty"));
        }
        let resolved = locate::resolve_upward_from(&self.search_origin()?, directory)?;
        self.directory = Some(resolved);
        Ok(())
    }

    /// Configure the baseline filename.
    ///
    /// An explicit name must start with `.` and be at least three bytes
    /// long, like `.data` or `.golden.json`. Setting a filename twice is an
    /// error.
    pub fn set_filename(&mut self, filename: &str) -> Result<()> {
        if self.filename.is_some() {
            return Err(RecorderError::config("recording filename already set"));
        }
        if filename.len() <= 2 || !filename.starts_with('.') {
            return Err(RecorderError::config(format!(
                "recording filename must start with '.' and be at least three characters, got \"{filename}\""
            )));
        }
        self.filename = Some(filename.to_owned());
        Ok(())
    }

    /// Install a filename that skips the shape check of
    /// [`Self::set_filename`]. Derived default names like
    /// `suite_case.data` do not start with a dot.
    pub(crate) fn install_derived_filename(&mut self, filename: String) {
        self.filename = Some(filename);
    }

    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The fully resolved baseline path.
    pub fn full_path(&self) -> Result<PathBuf> {
        let directory = self
            .directory
            .as_ref()
            .ok_or_else(|| RecorderError::config("recording directory not set"))?;
        let filename = self
            .filename
            .as_ref()
            .ok_or_else(|| RecorderError::config("recording filename not set"))?;
        Ok(directory.join(filename))
    }

    /// The directory upward searches start from.
    pub fn search_origin(&self) -> Result<PathBuf> {
        match &self.origin {
            Some(origin) => Ok(origin.clone()),
            None => env::current_dir().map_err(|source| RecorderError::io(".", source)),
        }
    }
}

/// Derived baseline filename for a test that never picked one.
pub fn default_filename(suite: &str, case: &str) -> Result<String> {
    if suite.is_empty() || case.is_empty() {
        return Err(RecorderError::config(
            "test identity must provide non-empty suite and case names",
        ));
    }
    Ok(format!("{suite}_{case}.data"))
}

/// Read a recording back, byte for byte.
pub fn read_recording(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RecorderError::io(path, source))
}

/// Write recorded content, byte for byte. The parent directory must already
/// exist.
pub fn write_recording(path: &Path, data: &str) -> Result<()> {
    fs::write(path, data).map_err(|source| RecorderError::io(path, source))
}
