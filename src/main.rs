use anyhow::*;
use flexi_logger::Logger;
use log::info;

use guild_stats_processor::abstractions::{DefaultFileSystem, DefaultSettingsManager, FileSystem, SettingsManager};
use guild_stats_processor::start;

#[tokio::main]
async fn main() -> Result<()> {
    let mut file_system = DefaultFileSystem::new();
    let settings_path = file_system.get_executable_directory()?.join("settings.json");

    let settings = DefaultSettingsManager::new(&mut file_system, settings_path).get_or_create()?;

    let _logger = Logger::try_with_env_or_str(&settings.log_level)?.start()?;

    info!("starting guild stats processor v{}", env!("CARGO_PKG_VERSION"));

    start(&file_system, settings, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown requested");
    })
    .await
}
