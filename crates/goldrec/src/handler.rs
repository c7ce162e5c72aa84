//! Mismatch handling strategies.
//!
//! A mismatch can be reported bare, with both payloads embedded in the
//! error, or rendered into a browsable diff document when the repository
//! ships the visualizer template. Which strategy applies is decided once
//! per recorder, the first time a record call needs it.

use std::path::{Path, PathBuf};

use regex_lite::{Captures, Regex};
use tracing::debug;

use crate::error::{RecorderError, Result};
use crate::locate;
use crate::mismatch::{MismatchInfo, MismatchReport};
use crate::store;

/// Repository-relative location of the diff visualizer template.
pub const VISUALIZER_ASSET: &str = "visualizer/recording_diff.html";

/// How a detected mismatch is turned into a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchHandler {
    /// Embed both payloads in the error and touch nothing on disk.
    Default,
    /// Render the template at the contained path into the artifact
    /// directory, alongside a copy of the raw mismatching payload.
    Diff(PathBuf),
}

impl MismatchHandler {
    /// Pick the strategy for a recorder whose caller installed none.
    ///
    /// Searches upward from `origin` for [`VISUALIZER_ASSET`]; shipping
    /// that template is how a repository opts in to diff rendering.
    #[must_use]
    pub fn select_from(origin: &Path) -> Self {
        match locate::resolve_upward_from(origin, Path::new(VISUALIZER_ASSET)) {
            Ok(template) => {
                debug!(template = ?template, "Using diff visualizer");
                Self::Diff(template)
            }
            Err(_) => {
                debug!("Using default mismatch handler");
                Self::Default
            }
        }
    }

    /// Produce the report for `info`, writing artifacts when rendering.
    pub fn handle(&self, info: &MismatchInfo) -> Result<MismatchReport> {
        match self {
            Self::Default => Ok(MismatchReport {
                recording_data: info.recording_data.clone(),
                mismatch_data: info.mismatch_data.clone(),
                recording_path: info.recording_path.clone(),
                artifact_dir: info.mismatch_dir.clone(),
                rendered_diff: None,
                mismatch_payload: None,
            }),
            Self::Diff(template_path) => render_diff_artifacts(template_path, info),
        }
    }
}

fn render_diff_artifacts(template_path: &Path, info: &MismatchInfo) -> Result<MismatchReport> {
    debug!(
        template = ?template_path,
        mismatch_dir = ?info.mismatch_dir,
        "Rendering diff visualizer"
    );
    let template = store::read_recording(template_path)?;
    let rendered = render_into_slots(&template, &info.recording_data, &info.mismatch_data);

    let template_name = template_path
        .file_name()
        .ok_or_else(|| RecorderError::config("diff template path has no file name"))?;
    let rendered_path = info.mismatch_dir.join(template_name);
    store::write_recording(&rendered_path, &rendered)?;

    let baseline_name = info
        .recording_path
        .file_name()
        .ok_or_else(|| RecorderError::config("recording path has no file name"))?;
    let payload_path = info.mismatch_dir.join(baseline_name);
    store::write_recording(&payload_path, &info.mismatch_data)?;

    Ok(MismatchReport {
        recording_data: info.recording_data.clone(),
        mismatch_data: info.mismatch_data.clone(),
        recording_path: info.recording_path.clone(),
        artifact_dir: info.mismatch_dir.clone(),
        rendered_diff: Some(rendered_path),
        mismatch_payload: Some(payload_path),
    })
}

/// Prefix every `${...}` interpolation marker with a backslash so payload
/// text stays inert when the rendered document evaluates its template
/// literals.
fn escape_template_markers(input: &str) -> String {
    let marker = Regex::new(r"\$\{[^}]+\}").expect("marker regex");
    marker.replace_all(input, r"\${0}").into_owned()
}

/// Splice the payloads into the template's `oldText`/`newText` slots.
///
/// The existing slot body (group 2) is dropped and rebuilt from the escaped
/// payload. Payloads go in through a closure: a `$` in the data must be
/// spliced literally, not expanded as a group reference. A template without
/// slots passes through unchanged.
fn render_into_slots(template: &str, recording: &str, mismatch: &str) -> String {
    let old_slot = Regex::new(r"(const\s+oldText\s*=\s*`)([^`]*)(`;)").expect("old slot regex");
    let new_slot = Regex::new(r"(const\s+newText\s*=\s*`)([^`]*)(`;)").expect("new slot regex");

    let recording = escape_template_markers(recording);
    let mismatch = escape_template_markers(mismatch);

    let rendered = old_slot.replace_all(template, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], recording, &caps[3])
    });
    let rendered = new_slot.replace_all(&rendered, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], mismatch, &caps[3])
    });
    rendered.into_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use proptest::prelude::*;
    use tempfile::tempdir;

    use super::{MismatchHandler, escape_template_markers, render_into_slots};
    use crate::error::RecorderErrorClass;
    use crate::mismatch::MismatchInfo;

    const TEMPLATE: &str = "<script>\nconst oldText = `OLD`;\nconst newText = `NEW`;\n</script>\n";

    fn sample_info(mismatch_dir: PathBuf, recording_path: PathBuf) -> MismatchInfo {
        MismatchInfo {
            recording_data: "hello world".to_string(),
            mismatch_data: "hello world!".to_string(),
            mismatch_dir,
            recording_path,
        }
    }

    #[test]
    fn marker_free_text_is_untouched() {
        for input in ["plain text", "$price", "{braces}", "$ {x}", "${}", ""] {
            assert_eq!(escape_template_markers(input), input);
        }
    }

    #[test]
    fn markers_are_backslash_prefixed() {
        assert_eq!(escape_template_markers("${name}"), r"\${name}");
        assert_eq!(
            escape_template_markers("a ${x} b ${y}"),
            r"a \${x} b \${y}"
        );
    }

    #[test]
    fn slots_receive_the_payloads() {
        let rendered = render_into_slots(TEMPLATE, "baseline text", "fresh text");
        assert!(rendered.contains("const oldText = `baseline text`;"));
        assert!(rendered.contains("const newText = `fresh text`;"));
        assert!(!rendered.contains("OLD"));
        assert!(!rendered.contains("NEW"));
        assert!(rendered.starts_with("<script>"));
        assert!(rendered.ends_with("</script>\n"));
    }

    #[test]
    fn every_slot_occurrence_is_replaced() {
        let template = "const oldText = `a`;\nconst oldText = `b`;\n";
        let rendered = render_into_slots(template, "x", "y");
        assert_eq!(rendered, "const oldText = `x`;\nconst oldText = `x`;\n");
    }

    #[test]
    fn templates_without_slots_pass_through() {
        let template = "<html>no slots here</html>";
        assert_eq!(render_into_slots(template, "a", "b"), template);
    }

    #[test]
    fn payload_markers_are_escaped_inside_slots() {
        let rendered = render_into_slots(TEMPLATE, "cost ${amount}", "cost ${total}");
        assert!(rendered.contains(r"const oldText = `cost \${amount}`;"));
        assert!(rendered.contains(r"const newText = `cost \${total}`;"));
    }

    #[test]
    fn dollar_signs_in_payloads_splice_literally() {
        let rendered = render_into_slots(TEMPLATE, "won $1 today", "won $2 today");
        assert!(rendered.contains("const oldText = `won $1 today`;"));
        assert!(rendered.contains("const newText = `won $2 today`;"));
    }

    #[test]
    fn default_handler_reports_without_touching_disk() {
        let root = tempdir().expect("tempdir");
        let info = sample_info(root.path().to_path_buf(), PathBuf::from("/repo/x.data"));

        let report = MismatchHandler::Default.handle(&info).expect("report");
        assert_eq!(report.recording_data, "hello world");
        assert_eq!(report.mismatch_data, "hello world!");
        assert_eq!(report.artifact_dir, root.path());
        assert!(report.rendered_diff.is_none());
        assert!(report.mismatch_payload.is_none());
        assert_eq!(fs::read_dir(root.path()).expect("read dir").count(), 0);
    }

    #[test]
    fn diff_handler_writes_rendered_document_and_raw_payload() {
        let root = tempdir().expect("tempdir");
        let template_path = root.path().join("recording_diff.html");
        fs::write(&template_path, TEMPLATE).expect("template");
        let artifact_dir = root.path().join("artifacts");
        fs::create_dir(&artifact_dir).expect("artifact dir");

        let mut info = sample_info(artifact_dir.clone(), PathBuf::from("/repo/case.data"));
        info.recording_data = "old ${tag}".to_string();
        info.mismatch_data = "new ${tag}".to_string();

        let handler = MismatchHandler::Diff(template_path);
        let report = handler.handle(&info).expect("report");

        let rendered_path = report.rendered_diff.expect("rendered diff");
        assert_eq!(rendered_path, artifact_dir.join("recording_diff.html"));
        let rendered = fs::read_to_string(&rendered_path).expect("rendered contents");
        assert!(rendered.contains(r"const oldText = `old \${tag}`;"));
        assert!(rendered.contains(r"const newText = `new \${tag}`;"));

        let payload_path = report.mismatch_payload.expect("payload copy");
        assert_eq!(payload_path, artifact_dir.join("case.data"));
        assert_eq!(
            fs::read_to_string(&payload_path).expect("payload contents"),
            "new ${tag}"
        );
    }

    #[test]
    fn diff_handler_fails_when_template_is_unreadable() {
        let root = tempdir().expect("tempdir");
        let info = sample_info(root.path().to_path_buf(), PathBuf::from("/repo/x.data"));

        let handler = MismatchHandler::Diff(root.path().join("absent.html"));
        let error = handler.handle(&info).expect_err("missing template");
        assert_eq!(error.class(), RecorderErrorClass::FatalIo);
    }

    proptest! {
        #[test]
        fn escaping_marker_free_text_is_identity(input in "[^$]{0,64}") {
            prop_assert_eq!(escape_template_markers(&input), input);
        }

        #[test]
        fn each_marker_gains_exactly_one_backslash(name in "[a-z]{1,8}") {
            let marker = format!("${{{name}}}");
            let escaped = escape_template_markers(&marker);
            prop_assert_eq!(escaped, format!("\\{marker}"));
        }
    }
}
