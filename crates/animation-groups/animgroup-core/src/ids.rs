//! Identifiers for animation groups and the scene nodes they reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnimGroupError;

/// Stable identity of an animation group. Its string form is the group's
/// property key in the host store.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generate a fresh random id.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from a property key such as
    /// "d7a6b716-10b0-40bb-a894-8bc13a992737".
    pub fn parse(key: &str) -> Result<Self, AnimGroupError> {
        Uuid::parse_str(key.trim())
            .map(Self)
            .map_err(|_| AnimGroupError::InvalidId {
                key: key.to_string(),
            })
    }

    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Property key under which the group body is stored.
    #[inline]
    pub fn key(&self) -> String {
        self.0.to_string()
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GroupId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for GroupId {
    type Err = AnimGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle of a scene node, in the host's own numbering. Handles are
/// reassigned whenever a node is recreated, so they are only meaningful
/// within one scene session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeHandle {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
