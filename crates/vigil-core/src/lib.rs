//! # vigil-core
//!
//! Core types shared across all Vigil crates.
//!
//! This crate provides:
//! - Identity types (`ObjectId`, `ContextRef`) used to attribute failures
//! - The `Violation` error carried by every invariant breach
//! - The object model (`Object`, parts, `AssetKind`, `DiscoveredObject`)
//! - Host collaborator contracts (`AssetStore`, `ObjectGraph`, `Presenter`)
//! - In-memory host adapters for embedding hosts, the CLI, and tests

pub mod errors;
pub mod host;
pub mod identity;
pub mod memory;
pub mod object;
pub mod violation;

pub use errors::StoreError;
pub use host::{AssetStore, ObjectGraph, PanelKind, Placement, Presenter, SceneRole};
pub use identity::{ContextRef, ObjectId};
pub use memory::{MemoryGraph, MemoryStore};
pub use object::{AssetKind, Descendants, DiscoveredObject, Object, Part};
pub use violation::Violation;
