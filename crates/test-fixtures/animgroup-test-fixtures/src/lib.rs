//! Named fixture files shared by the animation-group tests and benches.
//!
//! `fixtures/manifest.json` maps each fixture family to `name -> relative path`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(rename = "animation-groups")]
    portable: HashMap<String, String>,
    stores: HashMap<String, String>,
}

#[derive(Clone, Copy, Debug)]
enum Family {
    Portable,
    Store,
}

impl Family {
    fn entries(self) -> &'static HashMap<String, String> {
        match self {
            Family::Portable => &CATALOG.portable,
            Family::Store => &CATALOG.stores,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Family::Portable => "portable document",
            Family::Store => "store snapshot",
        }
    }

    /// Absolute path of fixture `name` in this family.
    fn locate(self, name: &str) -> Result<PathBuf> {
        let Some(rel) = self.entries().get(name) else {
            bail!("no {} fixture named '{name}'", self.label());
        };
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn text(self, name: &str) -> Result<String> {
        let path = self.locate(name)?;
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    fn parse<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.text(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("decoding {} fixture '{name}'", self.label()))
    }
}

/// Portable JSON documents (exports from a previous scene session).
pub mod animation_groups {
    use super::{DeserializeOwned, Family, PathBuf, Result};

    pub fn json(name: &str) -> Result<String> {
        Family::Portable.text(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        Family::Portable.parse(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Family::Portable.locate(name)
    }
}

/// Snapshots of root-object properties as a host would hold them.
pub mod stores {
    use super::{Deserialize, Family, HashMap, Result};

    /// Snapshot shape: `{ "index": [keys...], "properties": { key: value } }`.
    #[derive(Debug, Clone, Deserialize)]
    pub struct StoreSnapshot {
        pub index: Vec<String>,
        #[serde(default)]
        pub properties: HashMap<String, String>,
    }

    pub fn load(name: &str) -> Result<StoreSnapshot> {
        Family::Store.parse(name)
    }

}
