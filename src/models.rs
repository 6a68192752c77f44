use serde::{Deserialize, Deserializer, Serialize};

use crate::pagination::PaginationState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KillRecord {
    pub id: u64,
    #[serde(rename = "mapId")]
    pub map_id: u32,
    pub difficulty: u8,
    pub encounter_id: u32,
    #[serde(rename = "equipment", default, deserialize_with = "lenient_count")]
    pub equipment_level: u32,
    #[serde(rename = "healers", default)]
    pub healer_count: Option<u32>,
    #[serde(rename = "tanks", default)]
    pub tank_count: Option<u32>,
    #[serde(rename = "player_count", default, deserialize_with = "lenient_count")]
    pub total_players: u32,
    #[serde(rename = "time", default, deserialize_with = "lenient_text")]
    pub start_time: String,
    #[serde(rename = "timeEnd", default, deserialize_with = "lenient_text")]
    pub end_time: String,
}

// Display-only kill fields: null reads as zero, fractions are rounded.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;

    Ok(value.map_or(0, |value| value.max(0.0).round() as u32))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncounterDescriptor {
    pub order: u32,
    pub name: String,
    #[serde(default)]
    pub creature_name: String,
    #[serde(rename = "icon")]
    pub icon_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstanceDescriptor {
    pub map_id: u32,
    pub difficulty: u8,
    pub name: String,
    #[serde(rename = "icon")]
    pub icon_path: String,
    #[serde(rename = "background")]
    pub background_path: String,
    #[serde(rename = "ilvl")]
    pub item_level: u32,
    #[serde(rename = "actual")]
    pub is_current_tier: bool,
    #[serde(default)]
    pub encounters: Vec<EncounterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeekWindow {
    #[serde(rename = "week")]
    pub key: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageMeta {
    pub current_page: Option<u32>,
    pub last_page: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatestKillsPayload {
    #[serde(default)]
    pub data: Vec<KillRecord>,
    #[serde(default)]
    pub instances: Vec<InstanceDescriptor>,
    #[serde(default)]
    pub weeks: Vec<WeekWindow>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Raw pagination header values, left unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeaders {
    pub total_pages: Option<String>,
    pub current_page: Option<String>,
    pub per_page: Option<String>,
    pub total_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamPage {
    pub payload: LatestKillsPayload,
    pub headers: PageHeaders,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PveInfoPayload {
    #[serde(default)]
    pub data: Vec<InstanceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KillView {
    pub id: u64,
    pub boss_name: String,
    pub boss_icon: String,
    pub raid_name: String,
    pub difficulty_label: String,
    pub equipment: u32,
    pub dps: u32,
    pub healers: u32,
    pub tanks: u32,
    pub time: String,
    pub time_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidFilterOption {
    pub key: String,
    pub name: String,
    pub difficulty: u8,
    pub difficulty_label: String,
    pub filter_index: Option<u32>,
}

impl RaidFilterOption {
    pub fn is_selectable(&self) -> bool {
        self.filter_index.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BossOption {
    pub id: u32,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestKillsView {
    pub kills: Vec<KillView>,
    pub pagination: PaginationState,
    pub raids: Vec<RaidFilterOption>,
    pub bosses: Vec<BossOption>,
    pub filter_degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub id: String,
    pub name: String,
    pub difficulty_label: String,
    pub killed: u32,
    pub total: u32,
    pub ilvl: u32,
    pub icon: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionView {
    pub progress: Vec<ProgressItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildInfo {
    pub id: u64,
    pub name: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildRank {
    pub rid: u32,
    pub rname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemberSkill {
    pub skill: u32,
    pub value: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildMember {
    pub guid: u64,
    pub name: String,
    pub race: u32,
    pub class: u32,
    pub level: u32,
    pub gender: u32,
    pub ilvl: u32,
    pub skills: Vec<MemberSkill>,
    pub rank: u32,
    pub faction: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildRoster {
    pub guild: GuildInfo,
    pub ranks: Vec<GuildRank>,
    pub members: Vec<GuildMember>,
}
