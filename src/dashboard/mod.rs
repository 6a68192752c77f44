mod guild;
mod latest_kills;
mod progression;

use std::sync::Arc;

use crate::abstractions::{DefaultUpstreamApi, UpstreamApi};
use crate::error::ApiError;
use crate::models::{GuildRoster, LatestKillsView, ProgressionView};
use crate::raid_index::{RaidIndexResolver, RaidIndexTable};
use crate::week_window::PeriodKey;

/// What a caller asked the kill list for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillsQuery {
    /// `None` when the caller named a period we don't know, which means no
    /// date narrowing.
    pub period: Option<PeriodKey>,
    pub page: u32,
    pub raid_index: Option<u32>,
    pub boss: Option<u32>,
}

impl Default for KillsQuery {
    fn default() -> Self {
        Self {
            period: Some(PeriodKey::Current),
            page: 1,
            raid_index: None,
            boss: None,
        }
    }
}

pub trait Dashboard : Send + Sync + 'static {
    async fn latest_kills(&self, query: KillsQuery) -> Result<LatestKillsView, ApiError>;
    async fn progression(&self) -> Result<ProgressionView, ApiError>;
    async fn guild(&self) -> Result<GuildRoster, ApiError>;
}

/// The dashboard the binary serves.
pub type SirusDashboard = DefaultDashboard<DefaultUpstreamApi, RaidIndexTable>;

/// Serves every view from fresh upstream data. Nothing is kept between calls.
pub struct DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    upstream_api: Arc<UA>,
    raid_index: Arc<RI>,
    image_origin: String,
}

impl<UA, RI> Dashboard for DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    async fn latest_kills(&self, query: KillsQuery) -> Result<LatestKillsView, ApiError> {
        self.on_latest_kills(&query).await
    }

    async fn progression(&self) -> Result<ProgressionView, ApiError> {
        self.on_progression().await
    }

    async fn guild(&self) -> Result<GuildRoster, ApiError> {
        self.on_guild().await
    }
}

impl<UA, RI> DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    pub fn new(upstream_api: Arc<UA>, raid_index: Arc<RI>, image_origin: String) -> Self {
        Self {
            upstream_api,
            raid_index,
            image_origin,
        }
    }
}
