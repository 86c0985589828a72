//! In-memory host implementations.
//!
//! `MemoryStore` keeps root-object properties in maps and `MemoryScene` keeps a
//! flat node table with parent links. Both are enough to stage data off-host
//! and to drive the load/save/export/import paths in tests.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::host::{NodeInfo, PropertyStore, ResolvedNode, SceneGraph, TickRange};
use crate::ids::NodeHandle;

/// Name reported as the parent of top-level nodes.
pub const SCENE_ROOT_NAME: &str = "Scene Root";

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    strings: HashMap<String, String>,
    arrays: HashMap<String, Vec<String>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_string` calls so far.
    pub fn string_writes(&self) -> usize {
        self.writes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Keys of all string properties, sorted.
    pub fn string_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.strings.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl PropertyStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.strings.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.strings.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.strings.remove(key);
        Ok(())
    }

    fn get_string_array(&self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.arrays.get(key).cloned().unwrap_or_default())
    }

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        self.arrays.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    parent: Option<NodeHandle>,
}

/// Flat node table. Handles are allocated monotonically and never reused,
/// mirroring hosts that renumber nodes when they are recreated.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: Vec<(NodeHandle, SceneNode)>,
    next_handle: u32,
    range: TickRange,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_handle: 1,
            range: TickRange::default(),
        }
    }

    pub fn with_range(mut self, range: TickRange) -> Self {
        self.range = range;
        self
    }

    /// Add a node under `parent` (or at the top level) and return its handle.
    pub fn add_node(&mut self, name: &str, parent: Option<NodeHandle>) -> NodeHandle {
        let handle = NodeHandle(self.next_handle.max(1));
        self.next_handle = handle.0.wrapping_add(1);
        self.nodes.push((
            handle,
            SceneNode {
                name: name.to_string(),
                parent,
            },
        ));
        handle
    }

    /// Remove a node; its children become top-level nodes.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        self.nodes.retain(|(h, _)| *h != handle);
        for (_, node) in self.nodes.iter_mut() {
            if node.parent == Some(handle) {
                node.parent = None;
            }
        }
    }

    pub fn reparent(&mut self, handle: NodeHandle, parent: Option<NodeHandle>) {
        if let Some((_, node)) = self.nodes.iter_mut().find(|(h, _)| *h == handle) {
            node.parent = parent;
        }
    }

    pub fn rename(&mut self, handle: NodeHandle, name: &str) {
        if let Some((_, node)) = self.nodes.iter_mut().find(|(h, _)| *h == handle) {
            node.name = name.to_string();
        }
    }

    fn node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, node)| node)
    }

    fn parent_name(&self, node: &SceneNode) -> String {
        node.parent
            .and_then(|p| self.node(p))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| SCENE_ROOT_NAME.to_string())
    }
}

impl SceneGraph for MemoryScene {
    fn node_by_handle(&self, handle: NodeHandle) -> Option<NodeInfo> {
        self.node(handle).map(|node| NodeInfo {
            name: node.name.clone(),
            parent_name: self.parent_name(node),
        })
    }

    fn node_by_name(&self, name: &str) -> Option<ResolvedNode> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(handle, node)| ResolvedNode {
                handle: *handle,
                parent_name: self.parent_name(node),
            })
    }

    fn animation_range(&self) -> TickRange {
        self.range
    }
}
