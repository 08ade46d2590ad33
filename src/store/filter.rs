//! Compound document filters.

use serde_json::Value;

/// A store query combining a root `_id` with zero or more nested-element
/// conditions on dotted paths (`"seasons._id"`, `"seasons.episodes._id"`).
///
/// Dotted paths traverse arrays element-wise, so a condition matches when
/// *any* element chain satisfies it, independently of which branch the
/// other conditions matched. A compound match therefore proves the root
/// matched, not that the nested ids coexist on one branch; callers
/// re-verify existence at depth against the fetched document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// An empty filter, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the document `_id`.
    pub fn id(value: &str) -> Self {
        Self::new().with("_id", value)
    }

    /// Add an equality condition on a dotted path.
    pub fn with(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((path.to_string(), value.into()));
        self
    }

    /// The conditions in insertion order.
    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Whether `doc` satisfies every condition.
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|(path, expected)| {
            let segments: Vec<&str> = path.split('.').collect();
            path_matches(doc, &segments, expected)
        })
    }
}

/// Walk a dotted path through objects and arrays, checking equality at the
/// leaf. Arrays are traversed element-wise at every level.
pub(crate) fn path_matches(value: &Value, segments: &[&str], expected: &Value) -> bool {
    if segments.is_empty() {
        return match value {
            Value::Array(items) => items.iter().any(|item| item == expected),
            other => other == expected,
        };
    }

    match value {
        Value::Object(map) => map
            .get(segments[0])
            .is_some_and(|child| path_matches(child, &segments[1..], expected)),
        Value::Array(items) => items.iter().any(|item| path_matches(item, segments, expected)),
        _ => false,
    }
}

/// Whether an array element satisfies every field of a match condition
/// (an object such as `{"_id": "..."}`).
pub(crate) fn condition_matches(element: &Value, condition: &Value) -> bool {
    match condition {
        Value::Object(fields) => fields.iter().all(|(path, expected)| {
            let segments: Vec<&str> = path.split('.').collect();
            path_matches(element, &segments, expected)
        }),
        // A non-object condition matches by plain equality.
        other => element == other,
    }
}
