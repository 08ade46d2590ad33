//! Scoped update instructions.
//!
//! A small set of document-store update operators sufficient for scoped
//! nested-element mutation: `$set`, `$push`, `$pull`, the positional `$`
//! marker (resolved against the filter that matched the document), and
//! named `$[ident]` array-filter markers.
//!
//! A marker that resolves to no element applies the operation to nothing
//! and the update still succeeds; callers that need to know whether the
//! write landed re-verify against the returned document.

use serde_json::Value;

use super::filter::{condition_matches, path_matches, Filter};
use super::StoreError;

/// A named array-filter: `$[ident]` selects the elements whose `field`
/// equals `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayFilter {
    pub ident: String,
    pub field: String,
    pub value: Value,
}

/// A scoped update instruction built from `$set` / `$push` / `$pull`
/// buckets plus array-filter definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDoc {
    set: Vec<(String, Value)>,
    push: Vec<(String, Value)>,
    pull: Vec<(String, Value)>,
    array_filters: Vec<ArrayFilter>,
}

impl UpdateDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value at a dotted path. The path may contain `$` and
    /// `$[ident]` markers before the final field segment.
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set.push((path.to_string(), value.into()));
        self
    }

    /// Append a value to the array at a dotted path, creating the array
    /// when the field is absent.
    pub fn push(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.push.push((path.to_string(), value.into()));
        self
    }

    /// Remove every element matching `condition` from the array at a
    /// dotted path.
    pub fn pull(mut self, path: &str, condition: impl Into<Value>) -> Self {
        self.pull.push((path.to_string(), condition.into()));
        self
    }

    /// Define the `$[ident]` marker used by set/push/pull paths.
    pub fn array_filter(mut self, ident: &str, field: &str, value: impl Into<Value>) -> Self {
        self.array_filters.push(ArrayFilter {
            ident: ident.to_string(),
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty() && self.pull.is_empty()
    }

    /// Apply the instruction to a document already matched by `filter`.
    pub(crate) fn apply(&self, doc: &mut Value, filter: &Filter) -> Result<(), StoreError> {
        for (path, value) in &self.set {
            self.apply_op(doc, path, filter, &Op::Set(value))?;
        }
        for (path, value) in &self.push {
            self.apply_op(doc, path, filter, &Op::Push(value))?;
        }
        for (path, condition) in &self.pull {
            self.apply_op(doc, path, filter, &Op::Pull(condition))?;
        }
        Ok(())
    }

    fn apply_op(
        &self,
        doc: &mut Value,
        path: &str,
        filter: &Filter,
        op: &Op<'_>,
    ) -> Result<(), StoreError> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut logical_prefix = Vec::new();
        walk(doc, &segments, &mut logical_prefix, filter, &self.array_filters, op, path)
    }
}

enum Op<'a> {
    Set(&'a Value),
    Push(&'a Value),
    Pull(&'a Value),
}

/// Recursively resolve one path segment.
///
/// `logical_prefix` is the path walked so far with markers elided; it is
/// what positional resolution compares against the filter's dotted paths.
fn walk(
    value: &mut Value,
    segments: &[&str],
    logical_prefix: &mut Vec<String>,
    filter: &Filter,
    array_filters: &[ArrayFilter],
    op: &Op<'_>,
    full_path: &str,
) -> Result<(), StoreError> {
    let segment = segments[0];

    if segment == "$" {
        let Value::Array(items) = value else {
            return Err(StoreError::InvalidPath(full_path.to_string()));
        };
        let array_path = logical_prefix.join(".");
        let Some(index) = positional_index(filter, &array_path, items) else {
            // Positional marker matched nothing; the update is a no-op.
            return Ok(());
        };
        return walk(
            &mut items[index],
            &segments[1..],
            logical_prefix,
            filter,
            array_filters,
            op,
            full_path,
        );
    }

    if let Some(ident) = segment.strip_prefix("$[").and_then(|s| s.strip_suffix(']')) {
        let Value::Array(items) = value else {
            return Err(StoreError::InvalidPath(full_path.to_string()));
        };
        let Some(array_filter) = array_filters.iter().find(|f| f.ident == ident) else {
            return Err(StoreError::UndefinedArrayFilter(ident.to_string()));
        };
        let field_segments: Vec<&str> = array_filter.field.split('.').collect();
        for item in items.iter_mut() {
            if path_matches(item, &field_segments, &array_filter.value) {
                walk(
                    item,
                    &segments[1..],
                    logical_prefix,
                    filter,
                    array_filters,
                    op,
                    full_path,
                )?;
            }
        }
        return Ok(());
    }

    let Value::Object(map) = value else {
        return Err(StoreError::InvalidPath(full_path.to_string()));
    };

    if segments.len() == 1 {
        match op {
            Op::Set(new_value) => {
                map.insert(segment.to_string(), (*new_value).clone());
            }
            Op::Push(new_value) => {
                let entry = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                let Value::Array(items) = entry else {
                    return Err(StoreError::InvalidPath(full_path.to_string()));
                };
                items.push((*new_value).clone());
            }
            Op::Pull(condition) => {
                if let Some(Value::Array(items)) = map.get_mut(segment) {
                    items.retain(|element| !condition_matches(element, condition));
                }
            }
        }
        return Ok(());
    }

    if !map.contains_key(segment) {
        match op {
            // $set and $push create missing intermediate objects.
            Op::Set(_) | Op::Push(_) => {
                map.insert(segment.to_string(), Value::Object(Default::default()));
            }
            // Nothing to pull from.
            Op::Pull(_) => return Ok(()),
        }
    }
    let Some(child) = map.get_mut(segment) else {
        return Ok(());
    };

    logical_prefix.push(segment.to_string());
    let result = walk(
        child,
        &segments[1..],
        logical_prefix,
        filter,
        array_filters,
        op,
        full_path,
    );
    logical_prefix.pop();
    result
}

/// Index of the first element satisfying every filter condition scoped
/// under `array_path`. `None` when no condition references the array or
/// no element satisfies them all.
fn positional_index(filter: &Filter, array_path: &str, items: &[Value]) -> Option<usize> {
    let prefix = format!("{array_path}.");
    let nested: Vec<(Vec<&str>, &Value)> = filter
        .conditions()
        .iter()
        .filter_map(|(path, value)| {
            path.strip_prefix(&prefix)
                .map(|rest| (rest.split('.').collect(), value))
        })
        .collect();

    if nested.is_empty() {
        return None;
    }

    items.iter().position(|item| {
        nested
            .iter()
            .all(|(segments, value)| path_matches(item, segments, value))
    })
}
