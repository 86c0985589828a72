//! A single dirty-tracked animation group record.
//!
//! Ticks are the source of truth; frame accessors are rounded views over them.
//! Every setter returns whether it changed anything and only then marks the
//! record dirty. Encoding or decoding successfully is the only way back to
//! clean.

use std::fmt;

use crate::codec::{self, decode_value, encode_value};
use crate::config::Config;
use crate::error::Result;
use crate::host::{PropertyStore, TickRange};
use crate::ids::{GroupId, NodeHandle};

#[derive(Clone, Debug)]
pub struct AnimationGroup {
    id: GroupId,
    name: String,
    ticks_start: i32,
    ticks_end: i32,
    members: Vec<NodeHandle>,
    ticks_per_frame: i32,
    dirty: bool,
}

impl AnimationGroup {
    /// New group with a fresh id, the configured default name and `range`.
    pub fn new(config: &Config, range: TickRange) -> Self {
        Self {
            id: GroupId::new(),
            name: config.default_group_name.clone(),
            ticks_start: range.start,
            ticks_end: range.end,
            members: Vec::new(),
            ticks_per_frame: config.ticks_per_frame.max(1),
            dirty: true,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ticks_start(&self) -> i32 {
        self.ticks_start
    }

    #[inline]
    pub fn ticks_end(&self) -> i32 {
        self.ticks_end
    }

    #[inline]
    pub fn frame_start(&self) -> i32 {
        self.ticks_to_frame(self.ticks_start)
    }

    #[inline]
    pub fn frame_end(&self) -> i32 {
        self.ticks_to_frame(self.ticks_end)
    }

    #[inline]
    pub fn members(&self) -> &[NodeHandle] {
        &self.members
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn ticks_per_frame(&self) -> i32 {
        self.ticks_per_frame
    }

    /// Property key of this group (string form of its id).
    #[inline]
    pub fn key(&self) -> String {
        self.id.key()
    }

    pub fn set_id(&mut self, id: GroupId) -> bool {
        if self.id == id {
            return false;
        }
        self.id = id;
        self.dirty = true;
        true
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        self.dirty = true;
        true
    }

    pub fn set_ticks_start(&mut self, ticks: i32) -> bool {
        if self.ticks_start == ticks {
            return false;
        }
        self.ticks_start = ticks;
        self.dirty = true;
        true
    }

    pub fn set_ticks_end(&mut self, ticks: i32) -> bool {
        if self.ticks_end == ticks {
            return false;
        }
        self.ticks_end = ticks;
        self.dirty = true;
        true
    }

    /// No-op when `frame` equals the current rounded frame, even if the
    /// underlying ticks sit between frames.
    pub fn set_frame_start(&mut self, frame: i32) -> bool {
        if frame == self.frame_start() {
            return false;
        }
        self.ticks_start = self.frame_to_ticks(frame);
        self.dirty = true;
        true
    }

    pub fn set_frame_end(&mut self, frame: i32) -> bool {
        if frame == self.frame_end() {
            return false;
        }
        self.ticks_end = self.frame_to_ticks(frame);
        self.dirty = true;
        true
    }

    pub fn set_members(&mut self, members: &[NodeHandle]) -> bool {
        if self.members.as_slice() == members {
            return false;
        }
        self.members.clear();
        self.members.extend_from_slice(members);
        self.dirty = true;
        true
    }

    /// Deep copy of every field of `other`, id included. Always leaves the
    /// record dirty.
    pub fn copy_from(&mut self, other: &AnimationGroup) {
        self.id = other.id;
        self.name.clone_from(&other.name);
        self.ticks_start = other.ticks_start;
        self.ticks_end = other.ticks_end;
        self.members.clone_from(&other.members);
        self.ticks_per_frame = other.ticks_per_frame;
        self.dirty = true;
    }

    /// Produce `(key, value)` for the store and mark the record clean.
    /// Fails without touching the dirty flag when the name is not storable.
    pub fn encode(&mut self) -> Result<(String, String)> {
        let pair = self.encoded()?;
        self.dirty = false;
        Ok(pair)
    }

    /// Load from `key` and its stored `value`. A missing value leaves the
    /// record as it is apart from the id (a dangling index entry).
    pub fn decode(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        self.dirty = true;
        self.id = GroupId::parse(key)?;

        let Some(value) = value else {
            return Ok(());
        };
        let decoded = decode_value(value)?;
        self.name = decoded.name;
        self.ticks_start = decoded.ticks_start;
        self.ticks_end = decoded.ticks_end;
        self.members = decoded.members;
        self.dirty = false;
        Ok(())
    }

    pub fn load_from_store<S: PropertyStore + ?Sized>(&mut self, key: &str, store: &S) -> Result<()> {
        let value = store.get_string(key)?;
        self.decode(key, value.as_deref())
    }

    /// Encode and write this group. The record stays dirty if the write fails.
    pub fn save_to_store<S: PropertyStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        let (key, value) = self.encoded()?;
        store.set_string(&key, &value)?;
        self.dirty = false;
        Ok(())
    }

    pub fn delete_from_store<S: PropertyStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        self.dirty = true;
        store.delete(&self.key())?;
        Ok(())
    }

    fn encoded(&self) -> Result<(String, String)> {
        codec::validate_name(&self.name)?;
        let value = encode_value(&self.name, self.ticks_start, self.ticks_end, &self.members);
        Ok((self.key(), value))
    }

    fn ticks_to_frame(&self, ticks: i32) -> i32 {
        (ticks as f64 / self.ticks_per_frame as f64).round() as i32
    }

    fn frame_to_ticks(&self, frame: i32) -> i32 {
        frame.saturating_mul(self.ticks_per_frame)
    }
}

impl Default for AnimationGroup {
    fn default() -> Self {
        Self::new(&Config::default(), TickRange::default())
    }
}

impl fmt::Display for AnimationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.frame_start(), self.frame_end())
    }
}
