//! Filter-then-record composition: strip volatile JSON keys with
//! `goldrec_json::JsonFilter` before handing the payload to the recorder, so
//! reruns with fresh pids and timestamps still match the baseline.

use std::fs;
use std::path::Path;

use goldrec::{ArtifactAllocator, Recorder, RecorderErrorClass, StaticIdentity};
use goldrec_json::JsonFilter;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

fn fixture_tree() -> TempDir {
    let root = tempdir().expect("tempdir");
    fs::create_dir_all(root.path().join("test/recordings")).expect("baseline dir");
    fs::create_dir_all(root.path().join("artifacts")).expect("artifact root");
    root
}

fn recorder_at(root: &Path, case: &str) -> Recorder {
    Recorder::new(StaticIdentity::new("jsonlog", case))
        .with_search_origin(root.to_path_buf())
        .with_allocator(ArtifactAllocator::new(root.join("artifacts"), "mismatch"))
}

fn sample_log(pid: u64, started_at: &str) -> Value {
    json!({
        "event": "startup",
        "pid": pid,
        "started_at": started_at,
        "config": {
            "pid": pid,
            "threads": 4,
        },
    })
}

fn normalize(log: Value) -> String {
    JsonFilter::new(log)
        .transform_objects(|object| {
            object.remove("pid");
            object.remove("started_at");
        })
        .to_minified()
}

#[test]
fn filtered_logs_record_identically_across_runs() {
    let root = fixture_tree();

    let mut first_run = recorder_at(root.path(), "startup");
    first_run.set_recording_dir("test/recordings").expect("dir");
    first_run
        .record(&normalize(sample_log(4242, "2026-08-25T09:00:00Z")))
        .expect("baseline write");

    let mut second_run = recorder_at(root.path(), "startup");
    second_run.set_recording_dir("test/recordings").expect("dir");
    second_run
        .record(&normalize(sample_log(9001, "2026-08-25T09:05:11Z")))
        .expect("fresh pid and timestamp must still match");
}

#[test]
fn unfiltered_logs_mismatch_on_volatile_keys() {
    let root = fixture_tree();

    let mut recorder = recorder_at(root.path(), "raw");
    recorder.set_recording_dir("test/recordings").expect("dir");
    recorder
        .record(&sample_log(4242, "2026-08-25T09:00:00Z").to_string())
        .expect("baseline write");

    let error = recorder
        .record(&sample_log(9001, "2026-08-25T09:05:11Z").to_string())
        .expect_err("volatile keys must break the comparison");
    assert_eq!(error.class(), RecorderErrorClass::Mismatch);
}

#[test]
fn filtering_drops_nested_volatile_keys_from_the_baseline() {
    let root = fixture_tree();

    let mut recorder = recorder_at(root.path(), "nested");
    recorder.set_recording_dir("test/recordings").expect("dir");
    recorder
        .record(&normalize(sample_log(1, "2026-08-25T00:00:00Z")))
        .expect("baseline write");

    let baseline = fs::read_to_string(
        root.path().join("test/recordings/jsonlog_nested.data"),
    )
    .expect("baseline");
    assert!(!baseline.contains("pid"));
    assert!(!baseline.contains("started_at"));
    assert!(baseline.contains(r#""threads":4"#));
}
