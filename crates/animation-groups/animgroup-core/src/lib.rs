//! Animation group bookkeeping for scene exporters (host-agnostic).
//!
//! An animation group is a named, time-ranged selection of scene nodes. Groups
//! live as compact `;`-separated string properties on the host's root object,
//! indexed by a string-array property, and can be round-tripped through a
//! portable JSON document that survives being loaded into another scene.
//!
//! The host is reached only through the [`PropertyStore`] and [`SceneGraph`]
//! traits; adapters implement them and pass them into every operation.

pub mod codec;
pub mod config;
pub mod error;
pub mod group;
pub mod host;
pub mod ids;
pub mod list;
pub mod memory;
pub mod portable;

// Re-exports for consumers (adapters)
pub use codec::{decode_value, encode_value, validate_name, DecodedValue, SEPARATOR};
pub use config::Config;
pub use error::{AnimGroupError, ErrorKind, Result, StoreError};
pub use group::AnimationGroup;
pub use host::{NodeInfo, PropertyStore, ResolvedNode, SceneGraph, TickRange};
pub use ids::{GroupId, NodeHandle};
pub use list::AnimationGroupList;
pub use memory::{MemoryScene, MemoryStore};
pub use portable::{ImportReport, PortableGroup, PortableNode, ReconciliationSkip, SkipReason};
