use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::*;
use log::info;

use crate::abstractions::{DefaultUpstreamApi, FileSystem};
use crate::dashboard::DefaultDashboard;
use crate::raid_index::RaidIndexTable;
use crate::server::serve;
use crate::settings::Settings;

pub async fn start<FS, S>(file_system: &FS, settings: Settings, shutdown: S) -> Result<()>
where
    FS: FileSystem,
    S: Future<Output = ()>,
{
    let raid_index = load_raid_index(file_system, &settings)?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", settings.server.host, settings.server.port))?;

    info!(
        "serving guild {} on realm {} from {}",
        settings.upstream.guild_id,
        settings.upstream.realm_id,
        settings.upstream.base_url
    );

    let image_origin = settings.upstream.image_origin.clone();
    let upstream_api = DefaultUpstreamApi::new(settings.upstream);
    let dashboard = DefaultDashboard::new(Arc::new(upstream_api), Arc::new(raid_index), image_origin);

    serve(addr, Arc::new(dashboard), shutdown).await
}

/// Relative override paths are taken from the executable directory.
pub fn load_raid_index<FS: FileSystem>(file_system: &FS, settings: &Settings) -> Result<RaidIndexTable> {
    let Some(path) = &settings.raid_index_path else {
        return RaidIndexTable::embedded();
    };

    let path = if path.is_relative() {
        file_system.get_executable_directory()?.join(path)
    } else {
        path.clone()
    };

    RaidIndexTable::load(file_system, &path)
}
