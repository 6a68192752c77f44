use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{API_URL, GUILD_ID, IMAGE_ORIGIN, REALM_ID, SERVER_PORT, USER_AGENT};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub raid_index_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            upstream: UpstreamSettings::default(),
            raid_index_path: None,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: SERVER_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub image_origin: String,
    pub realm_id: u32,
    pub guild_id: u32,
    pub user_agent: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: API_URL.to_string(),
            image_origin: IMAGE_ORIGIN.to_string(),
            realm_id: REALM_ID,
            guild_id: GUILD_ID,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl UpstreamSettings {
    pub fn realm_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.realm_id)
    }
}
