//! Test identity injection.

/// Names identifying the currently running test.
///
/// The recorder derives a baseline filename from these when the caller never
/// picked one explicitly. Implementations typically read whatever the host
/// test framework exposes; [`StaticIdentity`] covers the common case of
/// fixing both names at construction.
pub trait TestIdentity {
    /// The suite (or fixture) name grouping related cases.
    fn suite_name(&self) -> String;

    /// The individual case name within the suite.
    fn case_name(&self) -> String;
}

/// A fixed suite/case pair supplied at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    suite: String,
    case: String,
}

impl StaticIdentity {
    #[must_use]
    pub fn new(suite: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            case: case.into(),
        }
    }
}

impl TestIdentity for StaticIdentity {
    fn suite_name(&self) -> String {
        self.suite.clone()
    }

    fn case_name(&self) -> String {
        self.case.clone()
    }
}
