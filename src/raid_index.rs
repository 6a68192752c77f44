use std::path::Path;

use anyhow::{bail, Context, Result};
use hashbrown::{HashMap, HashSet};
use log::info;
use serde::Deserialize;

use crate::abstractions::FileSystem;
use crate::models::InstanceDescriptor;

#[cfg(test)]
use mockall::automock;

const EMBEDDED_TABLE: &str = include_str!("../data/raid_index.json");

/// Maps an instance to the value the upstream expects in its `i` parameter.
/// `None` means the instance can't be used as a filter target.
#[cfg_attr(test, automock)]
pub trait RaidIndexResolver: Send + Sync + 'static {
    fn resolve(&self, instance: &InstanceDescriptor) -> Option<u32>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaidEntry {
    pub key: String,
    pub map_id: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub difficulties: HashMap<u8, u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaidIndexTable {
    pub version: u32,
    pub raids: Vec<RaidEntry>,
}

impl RaidIndexTable {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_TABLE).context("embedded raid index table is invalid")
    }

    pub fn load<FS: FileSystem>(file_system: &FS, path: &Path) -> Result<Self> {
        let json = file_system.read_to_string(path)?;
        let table = Self::from_json(&json)
            .with_context(|| format!("invalid raid index table at {}", path.display()))?;

        info!("loaded raid index table v{} from {}", table.version, path.display());

        Ok(table)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut table: Self = serde_json::from_str(json)?;
        let mut map_ids = HashSet::new();

        for raid in table.raids.iter_mut() {
            if !map_ids.insert(raid.map_id) {
                bail!("map id {} is listed more than once", raid.map_id);
            }

            raid.aliases = raid
                .aliases
                .iter()
                .filter(|alias| !alias.trim().is_empty())
                .map(|alias| alias.to_lowercase())
                .collect();
        }

        Ok(table)
    }

    // Map id decides when the table knows it; display names are a fallback
    // for instances the table has no id for.
    fn find_entry(&self, instance: &InstanceDescriptor) -> Option<&RaidEntry> {
        if let Some(entry) = self.raids.iter().find(|raid| raid.map_id == instance.map_id) {
            return Some(entry);
        }

        let name = instance.name.to_lowercase();

        self.raids
            .iter()
            .find(|raid| raid.aliases.iter().any(|alias| name.contains(alias.as_str())))
    }
}

impl RaidIndexResolver for RaidIndexTable {
    fn resolve(&self, instance: &InstanceDescriptor) -> Option<u32> {
        self.find_entry(instance)?
            .difficulties
            .get(&instance.difficulty)
            .copied()
    }
}
