use crate::catalog::{InstanceCatalog, InstanceKey};
use crate::models::{BossOption, RaidFilterOption};
use crate::raid_index::RaidIndexResolver;
use crate::utils::{absolute_image_url, difficulty_label};

/// Every catalog instance as a raid option, sorted by name then difficulty.
/// Options the resolver can't classify are kept for display.
pub fn raid_options<RI: RaidIndexResolver>(catalog: &InstanceCatalog, resolver: &RI) -> Vec<RaidFilterOption> {
    let mut options: Vec<RaidFilterOption> = catalog
        .iter()
        .map(|instance| RaidFilterOption {
            key: InstanceKey::from(instance).to_string(),
            name: instance.name.clone(),
            difficulty: instance.difficulty,
            difficulty_label: difficulty_label(instance.difficulty),
            filter_index: resolver.resolve(instance),
        })
        .collect();

    // Plain code point order, not locale collation: Cyrillic "ё" sorts after "я".
    options.sort_by(|a, b| a.name.cmp(&b.name).then(a.difficulty.cmp(&b.difficulty)));

    options
}

pub fn selectable_raids(options: &[RaidFilterOption]) -> Vec<&RaidFilterOption> {
    options.iter().filter(|option| option.is_selectable()).collect()
}

/// Bosses of the first catalog instance that resolves to `filter_index`.
pub fn boss_options<RI: RaidIndexResolver>(
    catalog: &InstanceCatalog,
    resolver: &RI,
    filter_index: u32,
    image_origin: &str,
) -> Vec<BossOption> {
    let Some(instance) = catalog
        .iter()
        .find(|instance| resolver.resolve(instance) == Some(filter_index))
    else {
        return Vec::new();
    };

    let mut bosses: Vec<BossOption> = instance
        .encounters
        .iter()
        .map(|encounter| BossOption {
            id: encounter.order,
            name: encounter.name.clone(),
            icon: absolute_image_url(image_origin, &encounter.icon_path),
        })
        .collect();

    bosses.sort_by_key(|boss| boss.id);

    bosses
}
