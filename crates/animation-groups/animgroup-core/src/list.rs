//! Ordered collection of animation groups and its persistence against the
//! host's root-object properties.
//!
//! Layout in the store:
//! - `config.index_property`: string array of group keys, in display order.
//! - one string property per group, keyed by the group id.

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::group::AnimationGroup;
use crate::host::{PropertyStore, TickRange};
use crate::ids::GroupId;

#[derive(Clone, Debug, Default)]
pub struct AnimationGroupList {
    config: Config,
    /// Range of records loaded without a stored body.
    default_range: TickRange,
    groups: Vec<AnimationGroup>,
}

impl AnimationGroupList {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            default_range: TickRange::default(),
            groups: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn default_range(&self) -> TickRange {
        self.default_range
    }

    /// Range given to index entries that have no stored body, normally the
    /// host's current timeline range.
    pub fn set_default_range(&mut self, range: TickRange) {
        self.default_range = range;
    }

    /// A new group configured like this list, not yet added to it.
    pub fn create_group(&self, range: TickRange) -> AnimationGroup {
        AnimationGroup::new(&self.config, range)
    }

    pub fn push(&mut self, group: AnimationGroup) {
        self.groups.push(group);
    }

    /// Remove the group at `index` and delete its property. The index
    /// property is rewritten on the next save.
    pub fn remove<S: PropertyStore + ?Sized>(
        &mut self,
        index: usize,
        store: &mut S,
    ) -> Result<Option<AnimationGroup>> {
        if index >= self.groups.len() {
            return Ok(None);
        }
        self.groups[index].delete_from_store(store)?;
        Ok(Some(self.groups.remove(index)))
    }

    pub fn get(&self, index: usize) -> Option<&AnimationGroup> {
        self.groups.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AnimationGroup> {
        self.groups.get_mut(index)
    }

    pub fn find(&self, id: GroupId) -> Option<&AnimationGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnimationGroup> {
        self.groups.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, AnimationGroup> {
        self.groups.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Group keys in list order.
    pub fn keys(&self) -> Vec<String> {
        self.groups.iter().map(AnimationGroup::key).collect()
    }

    /// Append every group named by the index property, in index order.
    /// The first record that fails to decode aborts the load.
    pub fn load_from_store<S: PropertyStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        let keys = store.get_string_array(&self.config.index_property)?;
        self.groups.reserve(keys.len());
        for key in &keys {
            let mut group = AnimationGroup::new(&self.config, self.default_range);
            group.load_from_store(key, store)?;
            self.groups.push(group);
        }
        debug!("loaded {} animation group(s) from store", keys.len());
        Ok(())
    }

    /// Write every dirty group, then rewrite the whole index. Record bodies
    /// go first so a failed save never leaves the index pointing at keys
    /// that were not written.
    pub fn save_to_store<S: PropertyStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        let mut written = 0usize;
        for group in self.groups.iter_mut().filter(|g| g.is_dirty()) {
            group.save_to_store(store)?;
            written += 1;
        }
        let keys = self.keys();
        store.set_string_array(&self.config.index_property, &keys)?;
        debug!(
            "saved {written} of {} animation group(s) to store",
            keys.len()
        );
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AnimationGroupList {
    type Item = &'a AnimationGroup;
    type IntoIter = std::slice::Iter<'a, AnimationGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
