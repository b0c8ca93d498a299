//! Object model shared by the asset store and the live object graph.
//!
//! An [`Object`] is an identity, a display name, a bag of typed parts, and an
//! owned list of children. A Composite asset is an object with descendants; a
//! Leaf asset is a single object. Live scene entities use the same shape.

use std::any::{Any, TypeId, type_name};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::SceneRole;
use crate::identity::ObjectId;

/// Discovery kind of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// An object tree whose descendants are validated too.
    Composite,
    /// A standalone object.
    Leaf,
    /// The store could not resolve the kind.
    Unknown,
}

/// A stored object found by an [`AssetStore`](crate::AssetStore) query.
///
/// Produced once per validation pass and never retained across passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredObject {
    pub id: ObjectId,
    pub kind: AssetKind,
    pub path: String,
}

/// A typed value attached to an object.
pub struct Part {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl Part {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Runtime type of the stored value.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn value(&self) -> &dyn Any {
        self.value.as_ref()
    }

    #[must_use]
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Part").field(&self.type_name).finish()
    }
}

#[derive(Debug)]
pub struct Object {
    id: ObjectId,
    name: String,
    parts: Vec<Part>,
    children: Vec<Object>,
}

impl Object {
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parts: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_part<T: Any>(mut self, value: T) -> Self {
        self.parts.push(Part::new(value));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_role(self, role: SceneRole) -> Self {
        self.with_part(role)
    }

    pub fn add_part<T: Any>(&mut self, value: T) {
        self.parts.push(Part::new(value));
    }

    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Detach the direct child with `id`, returning it if present.
    pub fn remove_child(&mut self, id: &ObjectId) -> Option<Self> {
        let index = self.children.iter().position(|c| &c.id == id)?;
        Some(self.children.remove(index))
    }

    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Detach the descendant with `id` from anywhere below this object.
    pub fn remove_descendant(&mut self, id: &ObjectId) -> Option<Self> {
        if let Some(found) = self.remove_child(id) {
            return Some(found);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.remove_descendant(id))
    }

    /// First part of type `T`, if any.
    #[must_use]
    pub fn part<T: Any>(&self) -> Option<&T> {
        self.parts.iter().find_map(Part::downcast::<T>)
    }

    #[must_use]
    pub fn has_role(&self, role: SceneRole) -> bool {
        self.parts
            .iter()
            .filter_map(Part::downcast::<SceneRole>)
            .any(|r| *r == role)
    }

    /// This object followed by every descendant, in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Find this object or a descendant by identity.
    #[must_use]
    pub fn find(&self, id: &ObjectId) -> Option<&Self> {
        self.descendants().find(|o| &o.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &ObjectId) -> Option<&mut Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

/// Pre-order walk over an object tree.
pub struct Descendants<'a> {
    stack: Vec<&'a Object>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Object;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
