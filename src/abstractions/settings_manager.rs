use std::path::PathBuf;
use anyhow::*;
use log::{debug, info};

use crate::settings::Settings;

#[cfg(test)]
use mockall::automock;

use super::FileSystem;

#[cfg_attr(test, automock)]
pub trait SettingsManager {
    fn get_or_create(&mut self) -> Result<Settings>;
    fn write(&mut self, settings: &Settings) -> Result<()>;
}

pub struct DefaultSettingsManager<'a, FS: FileSystem> {
    file_system: &'a mut FS,
    path: PathBuf
}

impl<'a, FS: FileSystem> SettingsManager for DefaultSettingsManager<'a, FS> {
    fn get_or_create(&mut self) -> Result<Settings> {

        if self.file_system.exists(&self.path) {
            let json = self.file_system.read_to_string(&self.path)?;
            let settings = serde_json::from_str(&json)
                .with_context(|| format!("invalid settings file {}", self.path.display()))?;
            debug!("loaded settings from {}", self.path.display());
            return Ok(settings);
        }

        let settings = Settings::default();
        self.write(&settings)?;
        info!("created default settings at {}", self.path.display());

        Ok(settings)
    }

    fn write(&mut self, settings: &Settings) -> Result<()> {
        let json_str = serde_json::to_string_pretty(&settings)?;
        self.file_system.write(&self.path, &json_str)?;

        Ok(())
    }
}

impl<'a, FS: FileSystem> DefaultSettingsManager<'a, FS> {
    pub fn new(file_system: &'a mut FS, path: PathBuf) -> Self {
        Self { file_system, path }
    }
}
