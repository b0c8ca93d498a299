//! In-memory host adapters.
//!
//! `MemoryStore` and `MemoryGraph` back the reference CLI and give embedding
//! hosts and tests a store and scene without a real engine behind them.

use std::cell::Cell;

use crate::errors::StoreError;
use crate::host::{AssetStore, ObjectGraph};
use crate::identity::ObjectId;
use crate::object::{AssetKind, DiscoveredObject, Object};

struct StoredEntry {
    id: ObjectId,
    path: String,
    kind: AssetKind,
    object: Option<Object>,
}

/// Ordered in-memory asset store. Query order follows insertion order.
#[derive(Default)]
pub struct MemoryStore {
    entries: Vec<StoredEntry>,
    queries: Cell<usize>,
    unavailable: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` at `path`. The object's own id is its storage identity.
    ///
    /// Ids are unique within the store: storing an id again replaces the
    /// earlier entry in place and hands back its object.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        kind: AssetKind,
        object: Object,
    ) -> Option<Object> {
        self.put(StoredEntry {
            id: object.id().clone(),
            path: normalize(&path.into()),
            kind,
            object: Some(object),
        })
    }

    /// Register an identity that is discoverable but fails to load.
    ///
    /// Replaces any entry with the same id, like [`MemoryStore::insert`].
    pub fn insert_missing(
        &mut self,
        path: impl Into<String>,
        kind: AssetKind,
        id: ObjectId,
    ) -> Option<Object> {
        self.put(StoredEntry {
            id,
            path: normalize(&path.into()),
            kind,
            object: None,
        })
    }

    fn put(&mut self, entry: StoredEntry) -> Option<Object> {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => std::mem::replace(existing, entry).object,
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Make every subsequent query fail with [`StoreError::Unavailable`].
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    /// Number of `find_by_kind_and_path` calls issued so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: &ObjectId) -> Option<&StoredEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }
}

impl AssetStore for MemoryStore {
    fn find_by_kind_and_path(
        &self,
        kinds: &[AssetKind],
        paths: &[String],
    ) -> Result<Vec<DiscoveredObject>, StoreError> {
        self.queries.set(self.queries.get() + 1);
        if let Some(reason) = &self.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        if let Some(path) = paths.iter().find(|p| p.trim().is_empty()) {
            return Err(StoreError::InvalidSearchPath {
                path: path.clone(),
                reason: "search path is blank".to_string(),
            });
        }

        Ok(self
            .entries
            .iter()
            .filter(|e| kinds.contains(&e.kind))
            .filter(|e| paths.is_empty() || paths.iter().any(|p| under_prefix(&e.path, p)))
            .map(|e| DiscoveredObject {
                id: e.id.clone(),
                kind: e.kind,
                path: e.path.clone(),
            })
            .collect())
    }

    fn load(&self, id: &ObjectId) -> Option<&Object> {
        self.entry(id).and_then(|e| e.object.as_ref())
    }

    fn kind_of(&self, id: &ObjectId) -> AssetKind {
        self.entry(id).map_or(AssetKind::Unknown, |e| e.kind)
    }
}

fn normalize(path: &str) -> String {
    path.trim_end_matches('/').to_string()
}

/// Prefix match on whole path segments: `configs` matches `configs/a` but not
/// `configs2/a`.
fn under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// In-memory scene: a named forest of live entities.
#[derive(Debug)]
pub struct MemoryGraph {
    scene_name: String,
    roots: Vec<Object>,
}

impl MemoryGraph {
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            roots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: Object) -> Self {
        self.roots.push(root);
        self
    }

    /// Add a root entity.
    pub fn spawn(&mut self, root: Object) {
        self.roots.push(root);
    }

    /// Attach `child` under the live entity `parent`.
    ///
    /// # Errors
    ///
    /// Hands `child` back when `parent` is not in the graph.
    pub fn attach(&mut self, parent: &ObjectId, child: Object) -> Result<(), Object> {
        match self.roots.iter_mut().find_map(|r| r.find_mut(parent)) {
            Some(found) => {
                found.add_child(child);
                Ok(())
            }
            None => Err(child),
        }
    }

    /// Remove an entity (and its subtree) from anywhere in the graph.
    pub fn despawn(&mut self, id: &ObjectId) -> Option<Object> {
        if let Some(index) = self.roots.iter().position(|r| r.id() == id) {
            return Some(self.roots.remove(index));
        }
        self.roots.iter_mut().find_map(|r| r.remove_descendant(id))
    }

    #[must_use]
    pub fn roots(&self) -> &[Object] {
        &self.roots
    }
}

impl ObjectGraph for MemoryGraph {
    fn scene_name(&self) -> &str {
        &self.scene_name
    }

    fn all_live(&self) -> Vec<&Object> {
        self.roots.iter().flat_map(Object::descendants).collect()
    }

    fn descendants_of(&self, id: &ObjectId) -> Vec<&Object> {
        self.roots
            .iter()
            .find_map(|r| r.find(id))
            .map(|found| found.descendants().skip(1).collect())
            .unwrap_or_default()
    }
}
