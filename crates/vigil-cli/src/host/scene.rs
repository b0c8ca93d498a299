//! The live scene read from a JSON description.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::{Map, Value};
use vigil_config::config_path;
use vigil_core::{MemoryGraph, Object, SceneRole};

use crate::schema::SchemaCache;

pub const SCENE_FILE: &str = "scene.json";

/// Scene name used when the project has no scene file.
pub const EMPTY_SCENE: &str = "untitled";

#[derive(Debug, Deserialize)]
struct SceneFile {
    name: String,
    #[serde(default)]
    entities: Vec<Map<String, Value>>,
}

/// Typed view of an entity document. The document itself is bound to its
/// schema whole, so schemas may constrain these keys too.
#[derive(Debug, Deserialize)]
struct EntityHeader {
    id: String,
    name: String,
    #[serde(default)]
    roles: Vec<SceneRole>,
    #[serde(default)]
    children: Vec<Map<String, Value>>,
}

/// Load the scene from `explicit` (relative to `root`) or `.vigil/scene.json`.
///
/// A missing default scene file yields an empty scene.
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing, or if the scene
/// file cannot be read or parsed.
pub fn load_scene(
    root: &Path,
    explicit: Option<&Path>,
    schemas: &mut SchemaCache,
) -> anyhow::Result<MemoryGraph> {
    let path = explicit.map_or_else(|| config_path(root, SCENE_FILE), |file| root.join(file));
    if !path.is_file() {
        if explicit.is_some() {
            bail!("scene file '{}' does not exist", path.display());
        }
        tracing::debug!(path = %path.display(), "no scene file; using an empty scene");
        return Ok(MemoryGraph::new(EMPTY_SCENE));
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read scene '{}'", path.display()))?;
    let scene: SceneFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse scene '{}'", path.display()))?;

    let mut graph = MemoryGraph::new(scene.name);
    for (index, fields) in scene.entities.iter().enumerate() {
        let entity = entity_object(fields, schemas)
            .with_context(|| format!("invalid entity #{index} in '{}'", path.display()))?;
        graph.spawn(entity);
    }
    Ok(graph)
}

fn entity_object(
    fields: &Map<String, Value>,
    schemas: &mut SchemaCache,
) -> anyhow::Result<Object> {
    let header: EntityHeader = serde_json::from_value(Value::Object(fields.clone()))?;
    let mut object = header
        .roles
        .into_iter()
        .fold(Object::new(header.id, header.name), Object::with_role);
    if let Some(bound) = schemas.bind(fields) {
        object.add_part(bound);
    }
    for child in &header.children {
        object.add_child(entity_object(child, schemas)?);
    }
    Ok(object)
}
