use std::fmt;

use hashbrown::HashMap;

use crate::models::{InstanceDescriptor, KillRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    pub map_id: u32,
    pub difficulty: u8,
}

impl InstanceKey {
    pub fn new(map_id: u32, difficulty: u8) -> Self {
        Self { map_id, difficulty }
    }
}

impl From<&InstanceDescriptor> for InstanceKey {
    fn from(instance: &InstanceDescriptor) -> Self {
        Self::new(instance.map_id, instance.difficulty)
    }
}

impl From<&KillRecord> for InstanceKey {
    fn from(kill: &KillRecord) -> Self {
        Self::new(kill.map_id, kill.difficulty)
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.map_id, self.difficulty)
    }
}

/// Instance metadata merged from every fetch made for one request.
///
/// The first descriptor seen for a key wins; later duplicates are discarded
/// whole rather than merged field by field. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct InstanceCatalog {
    entries: Vec<InstanceDescriptor>,
    index: HashMap<InstanceKey, usize>,
}

impl InstanceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many descriptors were actually inserted.
    pub fn merge(&mut self, instances: &[InstanceDescriptor]) -> usize {
        let mut inserted = 0;

        for instance in instances {
            let key = InstanceKey::from(instance);

            if self.index.contains_key(&key) {
                continue;
            }

            self.index.insert(key, self.entries.len());
            self.entries.push(instance.clone());
            inserted += 1;
        }

        inserted
    }

    pub fn get(&self, key: &InstanceKey) -> Option<&InstanceDescriptor> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstanceDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
