use log::{error, warn};

use crate::abstractions::{KillsRequest, UpstreamApi};
use crate::error::ApiError;
use crate::models::ProgressionView;
use crate::progression::build_progress;
use crate::raid_index::RaidIndexResolver;
use crate::week_window::{resolve_week_window, PeriodKey};

use super::DefaultDashboard;

impl<UA, RI> DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    pub async fn on_progression(&self) -> Result<ProgressionView, ApiError> {
        let first_page = KillsRequest::page(1);

        let (kills, pve_info) = tokio::join!(
            self.upstream_api.latest_kills(&first_page),
            self.upstream_api.pve_info()
        );

        let kills = kills.inspect_err(|err| error!("failed to fetch progression kills: {}", err))?;
        let instances = pve_info.inspect_err(|err| error!("failed to fetch pve info: {}", err))?;

        let mut payload = kills.payload;

        if let Some(week) = resolve_week_window(PeriodKey::LastFourWeeks, &payload.weeks).cloned() {
            let request = KillsRequest {
                page: 1,
                week: Some(week),
                ..Default::default()
            };

            match self.upstream_api.latest_kills(&request).await {
                Ok(ranged) => payload = ranged.payload,
                Err(err) => warn!("four week kills fetch failed, using first page: {}", err),
            }
        }

        let progress = build_progress(&payload.data, &instances, &self.image_origin);

        Ok(ProgressionView { progress })
    }
}
