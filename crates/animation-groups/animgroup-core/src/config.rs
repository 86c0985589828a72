//! Configuration for animation group storage.

use serde::{Deserialize, Serialize};

/// Host-defined constants used when reading and writing groups.
/// Keep this minimal; hosts override only what differs from the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Native ticks per animation frame (160 at 30 fps).
    pub ticks_per_frame: i32,
    /// Root-object property holding the ordered list of group keys.
    pub index_property: String,
    /// Name given to freshly created groups.
    pub default_group_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_frame: 160,
            index_property: "babylonjs_AnimationList".to_string(),
            default_group_name: "Animation".to_string(),
        }
    }
}
