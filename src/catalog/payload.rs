//! Partial-update payload construction for nested elements.

use serde_json::{Map, Value};

use crate::store::UpdateDoc;

/// Build a `$set`-only update targeting the one nested element a compound
/// filter resolves to.
///
/// `scope` is the array path up to the element, including any array-filter
/// markers it needs (`"saga"`, `"seasons"`, `"seasons.$[season].episodes"`);
/// every field in `fields` becomes a write to `{scope}.$.{field}`.
///
/// Every value shape is set: array-valued fields replace the stored array
/// wholesale rather than appending to it. Field names are written
/// verbatim; callers validate them beforehand.
pub fn scoped_update(scope: &str, fields: Map<String, Value>) -> UpdateDoc {
    let mut update = UpdateDoc::new();
    for (field, value) in fields {
        update = update.set(&format!("{scope}.$.{field}"), value);
    }
    update
}

/// Build a root-level `$set` update from a flat field map.
pub fn root_update(fields: Map<String, Value>) -> UpdateDoc {
    let mut update = UpdateDoc::new();
    for (field, value) in fields {
        update = update.set(&field, value);
    }
    update
}
