use log::error;

use crate::abstractions::UpstreamApi;
use crate::error::ApiError;
use crate::models::GuildRoster;
use crate::raid_index::RaidIndexResolver;

use super::DefaultDashboard;

impl<UA, RI> DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    pub async fn on_guild(&self) -> Result<GuildRoster, ApiError> {
        self.upstream_api
            .guild()
            .await
            .inspect_err(|err| error!("failed to fetch guild roster: {}", err))
    }
}
