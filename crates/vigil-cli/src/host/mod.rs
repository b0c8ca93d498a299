//! Project directory adapters for the host collaborators.
//!
//! Stored objects are the `*.json` files under the project root; the live
//! scene is read from `.vigil/scene.json`.

pub mod assets;
pub mod scene;

use serde_json::{Map, Value};
use vigil_core::Object;

use crate::schema::SchemaCache;

/// Whether a stored document has sub-objects.
pub fn is_composite(fields: &Map<String, Value>) -> bool {
    fields
        .get("children")
        .and_then(Value::as_array)
        .is_some_and(|children| !children.is_empty())
}

/// Build an object tree from a JSON document.
///
/// Children without an `id` are identified by their position under the
/// parent, e.g. `prefabs/truck/0/1`.
pub fn object_from_json(
    id: &str,
    fields: &Map<String, Value>,
    schemas: &mut SchemaCache,
) -> Object {
    let name = fields.get("name").and_then(Value::as_str).unwrap_or(id);
    let mut object = Object::new(id, name);
    if let Some(bound) = schemas.bind(fields) {
        object.add_part(bound);
    }

    let children = fields
        .get("children")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);
    for (index, child) in children.iter().enumerate() {
        let Value::Object(child) = child else {
            tracing::debug!(parent = id, index, "skipping non-object child");
            continue;
        };
        let child_id = child
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("{id}/{index}"), str::to_string);
        object.add_child(object_from_json(&child_id, child, schemas));
    }
    object
}
