//! Portable JSON interchange for animation groups.
//!
//! Export re-reads the persisted groups (not the in-memory list) and pins each
//! member handle to the node's current name and parent name. Import matches
//! those names against the current scene; handles from another session are
//! never trusted on their own.
//!
//! Document shape:
//! ```json
//! [{ "ID": "<uuid>", "Name": "Walk", "StartTick": 0, "EndTick": 4800,
//!    "NodeDataList": [{ "Handle": 12, "Name": "Arm", "ParentName": "Torso" }] }]
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::codec::{encode_value, validate_name};
use crate::error::{AnimGroupError, Result};
use crate::group::AnimationGroup;
use crate::host::{PropertyStore, SceneGraph};
use crate::ids::{GroupId, NodeHandle};
use crate::list::AnimationGroupList;

/// A member reference together with the structural fingerprint used to
/// recognise it in another scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortableNode {
    pub handle: NodeHandle,
    pub name: String,
    pub parent_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortableGroup {
    #[serde(rename = "ID")]
    pub id: GroupId,
    pub name: String,
    pub start_tick: i32,
    pub end_tick: i32,
    #[serde(default)]
    pub node_data_list: Vec<PortableNode>,
}

/// Why a group's membership was dropped on import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No node with the recorded name exists in the current scene.
    MissingNode { node: String },
    /// The node exists but now sits under a differently named parent.
    Reparented {
        node: String,
        expected_parent: String,
        found_parent: String,
    },
}

/// A group that was imported with an empty member list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconciliationSkip {
    pub id: GroupId,
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of groups written to the store.
    pub imported: usize,
    pub skipped: Vec<ReconciliationSkip>,
}

impl ImportReport {
    pub fn membership_dropped(&self, id: GroupId) -> bool {
        self.skipped.iter().any(|s| s.id == id)
    }
}

impl AnimationGroupList {
    /// Build descriptors from what is currently persisted in `store`.
    pub fn export_groups<S, G>(&self, store: &S, scene: &G) -> Result<Vec<PortableGroup>>
    where
        S: PropertyStore + ?Sized,
        G: SceneGraph + ?Sized,
    {
        let keys = store.get_string_array(&self.config().index_property)?;
        let mut out = Vec::with_capacity(keys.len());
        for key in &keys {
            let mut group = AnimationGroup::new(self.config(), scene.animation_range());
            group.load_from_store(key, store)?;
            out.push(describe(&group, scene));
        }
        Ok(out)
    }

    pub fn export_to_string<S, G>(&self, store: &S, scene: &G) -> Result<String>
    where
        S: PropertyStore + ?Sized,
        G: SceneGraph + ?Sized,
    {
        let groups = self.export_groups(store, scene)?;
        Ok(serde_json::to_string(&groups)?)
    }

    /// Export the persisted groups as one JSON document at `path`.
    pub fn export_to_path<S, G>(&self, path: impl AsRef<Path>, store: &S, scene: &G) -> Result<()>
    where
        S: PropertyStore + ?Sized,
        G: SceneGraph + ?Sized,
    {
        let path = path.as_ref();
        let json = self.export_to_string(store, scene)?;
        fs::write(path, json).map_err(|e| AnimGroupError::io(path, e))?;
        debug!("exported animation groups to {}", path.display());
        Ok(())
    }

    /// Replace the persisted groups with those in `json`, then reload this
    /// list from the store.
    ///
    /// Members are matched by name and parent name against `scene`. If any
    /// member of a group fails to match, the whole member list of that group
    /// is dropped; name and range are kept. Matched members take the handle
    /// the current scene reports for them.
    ///
    /// Every name is checked before anything is written; one unstorable name
    /// fails the import and leaves the store untouched.
    pub fn import_from_json<S, G>(&mut self, json: &str, store: &mut S, scene: &G) -> Result<ImportReport>
    where
        S: PropertyStore + ?Sized,
        G: SceneGraph + ?Sized,
    {
        self.clear();
        let groups: Vec<PortableGroup> = serde_json::from_str(json)?;
        for group in &groups {
            validate_name(&group.name)?;
        }

        let mut report = ImportReport::default();
        for group in &groups {
            let members = match reconcile(group, scene) {
                Ok(members) => members,
                Err(reason) => {
                    warn!(
                        "dropping members of animation group '{}' ({}): {reason:?}",
                        group.name, group.id
                    );
                    report.skipped.push(ReconciliationSkip {
                        id: group.id,
                        name: group.name.clone(),
                        reason,
                    });
                    Vec::new()
                }
            };
            let value = encode_value(&group.name, group.start_tick, group.end_tick, &members);
            store.set_string(&group.id.key(), &value)?;
        }

        let keys: Vec<String> = groups.iter().map(|g| g.id.key()).collect();
        store.set_string_array(&self.config().index_property, &keys)?;
        report.imported = groups.len();

        self.set_default_range(scene.animation_range());
        self.load_from_store(store)?;
        debug!(
            "imported {} animation group(s), {} without members",
            report.imported,
            report.skipped.len()
        );
        Ok(report)
    }

    pub fn import_from_path<S, G>(
        &mut self,
        path: impl AsRef<Path>,
        store: &mut S,
        scene: &G,
    ) -> Result<ImportReport>
    where
        S: PropertyStore + ?Sized,
        G: SceneGraph + ?Sized,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| AnimGroupError::io(path, e))?;
        self.import_from_json(&json, store, scene)
    }
}

fn describe<G: SceneGraph + ?Sized>(group: &AnimationGroup, scene: &G) -> PortableGroup {
    let node_data_list = group
        .members()
        .iter()
        .map(|&handle| match scene.node_by_handle(handle) {
            Some(info) => PortableNode {
                handle,
                name: info.name,
                parent_name: info.parent_name,
            },
            None => {
                warn!(
                    "node {handle} of animation group '{}' no longer exists",
                    group.name()
                );
                PortableNode {
                    handle,
                    name: String::new(),
                    parent_name: String::new(),
                }
            }
        })
        .collect();

    PortableGroup {
        id: group.id(),
        name: group.name().to_string(),
        start_tick: group.ticks_start(),
        end_tick: group.ticks_end(),
        node_data_list,
    }
}

/// Current handles for every member, or the first reason one cannot be
/// trusted.
fn reconcile<G: SceneGraph + ?Sized>(
    group: &PortableGroup,
    scene: &G,
) -> std::result::Result<Vec<NodeHandle>, SkipReason> {
    group
        .node_data_list
        .iter()
        .map(|node| {
            let found = scene
                .node_by_name(&node.name)
                .ok_or_else(|| SkipReason::MissingNode {
                    node: node.name.clone(),
                })?;
            if found.parent_name != node.parent_name {
                return Err(SkipReason::Reparented {
                    node: node.name.clone(),
                    expected_parent: node.parent_name.clone(),
                    found_parent: found.parent_name,
                });
            }
            Ok(found.handle)
        })
        .collect()
}
