use crate::catalog::InstanceCatalog;
use crate::models::*;

pub fn catalog_from<'a, I>(lists: I) -> InstanceCatalog
where
    I: IntoIterator<Item = &'a [InstanceDescriptor]>,
{
    let mut catalog = InstanceCatalog::new();

    for list in lists {
        catalog.merge(list);
    }

    catalog
}

pub fn instance(map_id: u32, difficulty: u8, name: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        map_id,
        difficulty,
        name: name.to_string(),
        icon_path: format!("/img/raids/{map_id}.png"),
        background_path: format!("/img/raids/{map_id}_bg.png"),
        item_level: 200 + difficulty as u32 * 4,
        is_current_tier: true,
        encounters: (1..=3)
            .map(|order| encounter(map_id, order, &format!("Босс {order}")))
            .collect(),
    }
}

pub fn encounter(map_id: u32, order: u32, name: &str) -> EncounterDescriptor {
    EncounterDescriptor {
        order,
        name: name.to_string(),
        creature_name: name.to_string(),
        icon_path: format!("/img/bosses/{map_id}_{order}.png"),
    }
}

pub fn naxxramas(difficulty: u8) -> InstanceDescriptor {
    let mut naxx = instance(533, difficulty, "Наксрамас");
    naxx.encounters = vec![
        encounter(533, 1, "Ануб'Рекан"),
        encounter(533, 2, "Лотхиб"),
        encounter(533, 3, "Гроббулус"),
    ];
    naxx
}

pub fn ulduar(difficulty: u8) -> InstanceDescriptor {
    let mut ulduar = instance(603, difficulty, "Ульдуар");
    ulduar.item_level = 226 + difficulty as u32 * 4;
    ulduar.encounters = vec![
        encounter(603, 1, "Огненный Левиафан"),
        encounter(603, 2, "Игнис"),
        encounter(603, 3, "Острокрылая"),
    ];
    ulduar
}

pub fn kill(id: u64, map_id: u32, difficulty: u8, encounter_id: u32) -> KillRecord {
    KillRecord {
        id,
        map_id,
        difficulty,
        encounter_id,
        equipment_level: 230,
        healer_count: Some(5),
        tank_count: Some(2),
        total_players: 25,
        start_time: "2026-10-15 20:00:00".to_string(),
        end_time: "2026-10-15 20:05:00".to_string(),
    }
}

pub fn week(key: &str, from: &str, to: &str) -> WeekWindow {
    WeekWindow {
        key: key.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    }
}

pub fn roster(member_count: u32) -> GuildRoster {
    GuildRoster {
        guild: GuildInfo {
            id: 39104,
            name: "Kansas City".to_string(),
            level: 25,
        },
        ranks: vec![
            GuildRank { rid: 0, rname: "Глава".to_string() },
            GuildRank { rid: 1, rname: "Рейдер".to_string() },
        ],
        members: (0..member_count)
            .map(|guid| GuildMember {
                guid: guid as u64 + 1,
                name: format!("Игрок{guid}"),
                race: 1,
                class: 1 + guid % 10,
                level: 80,
                gender: 0,
                ilvl: 232,
                skills: vec![MemberSkill { skill: 164, value: 450, max: 450 }],
                rank: 1,
                faction: 0,
            })
            .collect(),
    }
}
