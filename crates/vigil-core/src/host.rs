//! Contracts for the host collaborators Vigil runs against.
//!
//! Vigil never owns asset storage, the live scene graph, or the windowing of
//! its feedback panels. Hosts implement these traits and hand them in.

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::identity::ObjectId;
use crate::object::{AssetKind, DiscoveredObject, Object};

/// Storage of configuration objects, queried by kind and path prefix.
pub trait AssetStore {
    /// Enumerate stored objects of the given kinds under any of `paths`.
    ///
    /// An empty `paths` slice means the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot answer the query. This is
    /// a misconfiguration, not a validation failure.
    fn find_by_kind_and_path(
        &self,
        kinds: &[AssetKind],
        paths: &[String],
    ) -> Result<Vec<DiscoveredObject>, StoreError>;

    /// Load an object. `None` means the object is absent for reasons outside
    /// Vigil's concern.
    fn load(&self, id: &ObjectId) -> Option<&Object>;

    fn kind_of(&self, id: &ObjectId) -> AssetKind;
}

/// Singleton roles the built-in scene invariants look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneRole {
    PrimaryViewpoint,
    AudioSink,
    InputDispatch,
    DirectionalLight,
}

impl SceneRole {
    pub const ALL: [Self; 4] = [
        Self::PrimaryViewpoint,
        Self::AudioSink,
        Self::InputDispatch,
        Self::DirectionalLight,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrimaryViewpoint => "primary viewpoint",
            Self::AudioSink => "audio sink",
            Self::InputDispatch => "input dispatch",
            Self::DirectionalLight => "primary directional light",
        }
    }
}

/// The live entity graph of the active scene.
///
/// Entity identity is stable for the entity's lifetime in the graph.
pub trait ObjectGraph {
    fn scene_name(&self) -> &str;

    /// Every live entity, roots and nested children alike.
    fn all_live(&self) -> Vec<&Object>;

    /// Every entity below `id`, excluding `id` itself.
    fn descendants_of(&self, id: &ObjectId) -> Vec<&Object>;

    /// Live entities carrying `role`.
    fn with_role(&self, role: SceneRole) -> Vec<&Object> {
        self.all_live()
            .into_iter()
            .filter(|o| o.has_role(role))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Message,
    Failure,
}

/// Where a panel sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum Placement {
    Centered,
    Offset { x: f32, y: f32 },
}

/// Windowing surface for feedback panels. All calls are fire-and-forget.
pub trait Presenter {
    fn show_message(&self, text: &str);

    fn show_failure(&self, text: &str, active_contexts: &[String]);

    fn place(&self, _panel: PanelKind, _placement: Placement) {}

    fn close(&self, _panel: PanelKind) {}

    fn copy_to_clipboard(&self, _text: &str) {}
}
