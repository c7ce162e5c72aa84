//! Recursive key rewriting over parsed JSON documents.

use std::fmt;

use serde_json::{Map, Value};

/// A parsed JSON document plus a recursive object-rewriting pass.
///
/// The visitor passed to [`JsonFilter::transform_objects`] runs on the root
/// object and on every object nested as an object value, outermost first.
/// Values inside arrays are left untouched, as are non-object documents.
///
/// # Example
/// ```
/// use goldrec_json::JsonFilter;
/// use serde_json::json;
///
/// let filtered = JsonFilter::parse(r#"{"event":"spawn","pid":4242}"#)
///     .expect("valid json")
///     .transform_objects(|object| {
///         if let Some(pid) = object.get_mut("pid") {
///             *pid = json!(0);
///         }
///     });
/// assert_eq!(filtered.to_minified(), r#"{"event":"spawn","pid":0}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFilter {
    value: Value,
}

impl JsonFilter {
    /// Parse a JSON string into a filter.
    pub fn parse(data: &str) -> serde_json::Result<Self> {
        Ok(Self {
            value: serde_json::from_str(data)?,
        })
    }

    /// Wrap an already-parsed value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Apply `visitor` to the root object and every nested object value.
    #[must_use]
    pub fn transform_objects(mut self, mut visitor: impl FnMut(&mut Map<String, Value>)) -> Self {
        transform_object(&mut self.value, &mut visitor);
        self
    }

    /// The filtered document.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The filtered document rendered as minified JSON.
    #[must_use]
    pub fn to_minified(&self) -> String {
        self.value.to_string()
    }
}

impl From<Value> for JsonFilter {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for JsonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

fn transform_object(value: &mut Value, visitor: &mut impl FnMut(&mut Map<String, Value>)) {
    if let Value::Object(object) = value {
        visitor(object);
        for child in object.values_mut() {
            transform_object(child, visitor);
        }
    }
}
