use log::debug;

use crate::catalog::{InstanceCatalog, InstanceKey};
use crate::models::{KillRecord, KillView};
use crate::utils::{absolute_image_url, difficulty_label};

/// Joins raw kills against the catalog, newest first by `id`.
///
/// A repeated `id` is kept once. Kills whose instance or encounter is missing
/// from the catalog are dropped.
pub fn aggregate_kills(kills: &[KillRecord], catalog: &InstanceCatalog, image_origin: &str) -> Vec<KillView> {
    let mut sorted: Vec<&KillRecord> = kills.iter().collect();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted.dedup_by_key(|kill| kill.id);

    sorted
        .into_iter()
        .filter_map(|kill| to_view(kill, catalog, image_origin))
        .collect()
}

fn to_view(kill: &KillRecord, catalog: &InstanceCatalog, image_origin: &str) -> Option<KillView> {
    let key = InstanceKey::from(kill);

    let Some(instance) = catalog.get(&key) else {
        debug!("dropping kill {}: unknown instance {}", kill.id, key);
        return None;
    };

    let Some(encounter) = instance
        .encounters
        .iter()
        .find(|encounter| encounter.order == kill.encounter_id)
    else {
        debug!("dropping kill {}: {} has no encounter {}", kill.id, key, kill.encounter_id);
        return None;
    };

    let healers = kill.healer_count.unwrap_or(0);
    let tanks = kill.tank_count.unwrap_or(0);

    Some(KillView {
        id: kill.id,
        boss_name: encounter.name.clone(),
        boss_icon: absolute_image_url(image_origin, &encounter.icon_path),
        raid_name: instance.name.clone(),
        difficulty_label: difficulty_label(kill.difficulty),
        equipment: kill.equipment_level,
        dps: dps_count(kill.total_players, healers, tanks),
        healers,
        tanks,
        time: kill.start_time.clone(),
        time_end: kill.end_time.clone(),
    })
}

// Upstream role counts can exceed the raid size.
pub fn dps_count(total_players: u32, healers: u32, tanks: u32) -> u32 {
    total_players.saturating_sub(healers).saturating_sub(tanks)
}
