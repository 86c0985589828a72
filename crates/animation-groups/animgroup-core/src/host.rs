//! Host collaborator traits.
//!
//! Adapters for a concrete authoring tool implement these against the scene's
//! root object and node table, then pass them into the load/save/export/import
//! operations. Nothing here caches what the host returns; node lookups are
//! repeated on demand because the host may invalidate them at any time.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ids::NodeHandle;

/// Key/value string properties on the scene's root object.
pub trait PropertyStore {
    /// Read a string property; `Ok(None)` when the key is not set.
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a property. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Read an array-of-strings property; an unset key reads as empty.
    fn get_string_array(&self, key: &str) -> Result<Vec<String>, StoreError>;

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError>;
}

/// Node as seen through its handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub parent_name: String,
}

/// Node as seen through its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedNode {
    pub handle: NodeHandle,
    pub parent_name: String,
}

/// Inclusive range in native ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub start: i32,
    pub end: i32,
}

impl TickRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

/// Read-only view of the host scene graph.
pub trait SceneGraph {
    fn node_by_handle(&self, handle: NodeHandle) -> Option<NodeInfo>;

    /// First node carrying `name`, if any.
    fn node_by_name(&self, name: &str) -> Option<ResolvedNode>;

    /// Current timeline range, used as the default range of new groups.
    fn animation_range(&self) -> TickRange {
        TickRange::default()
    }
}
