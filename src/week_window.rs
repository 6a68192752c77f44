use serde::{Deserialize, Serialize};

use crate::models::WeekWindow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKey {
    #[default]
    Current,
    Previous,
    LastTwoWeeks,
    LastFourWeeks,
}

impl PeriodKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKey::Current => "current",
            PeriodKey::Previous => "previous",
            PeriodKey::LastTwoWeeks => "last_two_weeks",
            PeriodKey::LastFourWeeks => "last_four_weeks",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "current" => Some(PeriodKey::Current),
            "previous" => Some(PeriodKey::Previous),
            "last_two_weeks" => Some(PeriodKey::LastTwoWeeks),
            "last_four_weeks" => Some(PeriodKey::LastFourWeeks),
            _ => None,
        }
    }
}

/// Finds the window the upstream reported for `period`.
///
/// Boundaries are never computed locally; a missing key means the caller
/// should not narrow by date at all.
pub fn resolve_week_window(period: PeriodKey, weeks: &[WeekWindow]) -> Option<&WeekWindow> {
    weeks.iter().find(|week| week.key == period.as_str())
}
