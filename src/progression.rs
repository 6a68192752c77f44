use hashbrown::{HashMap, HashSet};

use crate::catalog::InstanceKey;
use crate::models::{InstanceDescriptor, KillRecord, ProgressItem};
use crate::utils::{absolute_image_url, difficulty_label};

/// Kill progress of every current-tier instance, highest item level first.
pub fn build_progress(kills: &[KillRecord], instances: &[InstanceDescriptor], image_origin: &str) -> Vec<ProgressItem> {
    let mut killed_by_instance: HashMap<InstanceKey, HashSet<u32>> = HashMap::new();

    for kill in kills {
        killed_by_instance
            .entry(InstanceKey::from(kill))
            .or_default()
            .insert(kill.encounter_id);
    }

    let mut progress: Vec<ProgressItem> = instances
        .iter()
        .filter(|instance| instance.is_current_tier)
        .map(|instance| {
            let key = InstanceKey::from(instance);
            let total = instance.encounters.len() as u32;
            let killed = killed_by_instance
                .get(&key)
                .map_or(0, |killed| (killed.len() as u32).min(total));

            ProgressItem {
                id: key.to_string(),
                name: instance.name.clone(),
                difficulty_label: difficulty_label(instance.difficulty),
                killed,
                total,
                ilvl: instance.item_level,
                icon: absolute_image_url(image_origin, &instance.icon_path),
                background: absolute_image_url(image_origin, &instance.background_path),
            }
        })
        .collect();

    progress.sort_by(|a, b| b.ilvl.cmp(&a.ilvl));

    progress
}
