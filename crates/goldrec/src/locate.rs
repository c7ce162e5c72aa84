//! Upward path resolution.
//!
//! Tests run from build-dependent working directories (the workspace root,
//! a target directory, an IDE runner), while the fixtures they need sit at
//! fixed positions inside the repository. The functions here bridge that
//! gap by walking from a start directory toward the filesystem root until a
//! relative fragment matches an existing path.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{RecorderError, Result};

/// Resolve `fragment` by searching upward from the process working
/// directory. See [`resolve_upward_from`] for the search rules.
pub fn resolve_upward(fragment: impl AsRef<Path>) -> Result<PathBuf> {
    let origin = env::current_dir().map_err(|source| RecorderError::io(".", source))?;
    resolve_upward_from(&origin, fragment.as_ref())
}

/// Resolve `fragment` by searching upward from `origin`.
///
/// An absolute `fragment` is returned verbatim without touching the
/// filesystem. A bare filename (no directory component) is joined to
/// `origin` and also returned without an existence check, so callers
/// relying on bare names must create the target themselves; only
/// multi-component fragments are verified. Those are joined to `origin` and
/// then to each of its ancestors in turn, and the first candidate that
/// exists wins, so the match nearest to `origin` shadows any match further
/// up. Exhausting the ancestor chain (the filesystem root included) yields
/// [`RecorderError::NotFound`] carrying every candidate tried, in search
/// order.
pub fn resolve_upward_from(origin: &Path, fragment: &Path) -> Result<PathBuf> {
    if fragment.is_absolute() {
        return Ok(fragment.to_path_buf());
    }
    if is_bare_filename(fragment) {
        return Ok(origin.join(fragment));
    }

    let mut searched = Vec::new();
    for dir in origin.ancestors() {
        let candidate = dir.join(fragment);
        if candidate.exists() {
            return Ok(candidate);
        }
        searched.push(candidate);
    }
    Err(RecorderError::NotFound {
        fragment: fragment.to_path_buf(),
        searched,
    })
}

fn is_bare_filename(fragment: &Path) -> bool {
    fragment
        .parent()
        .is_none_or(|parent| parent.as_os_str().is_empty())
}
