use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a stored object or live entity.
///
/// Hosts choose the representation (GUIDs, paths, instance ids); Vigil only
/// compares and hashes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Operator-facing attribution of a failure.
///
/// Used purely to tell a human which object produced a violation. Nothing in
/// Vigil branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextRef {
    /// A stored object, identified by its storage path.
    Asset { path: String },
    /// A live entity in the object graph.
    Entity { id: ObjectId, name: String },
    /// A whole scene (used by built-in scene invariants).
    Scene { name: String },
    /// No attribution was supplied.
    Unattributed,
}

impl ContextRef {
    pub fn asset(path: impl Into<String>) -> Self {
        Self::Asset { path: path.into() }
    }

    pub fn entity(id: ObjectId, name: impl Into<String>) -> Self {
        Self::Entity {
            id,
            name: name.into(),
        }
    }

    pub fn scene(name: impl Into<String>) -> Self {
        Self::Scene { name: name.into() }
    }

    /// Storage path, if this context refers to a stored object.
    #[must_use]
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::Asset { path } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { path } => write!(f, "asset '{path}'"),
            Self::Entity { id, name } => write!(f, "entity '{name}' ({id})"),
            Self::Scene { name } => write!(f, "scene '{name}'"),
            Self::Unattributed => f.write_str("unattributed"),
        }
    }
}
