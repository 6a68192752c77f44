use std::time::Duration;

pub const API_URL: &str = "https://sirus.su/api/base";
pub const IMAGE_ORIGIN: &str = "https://sirus.su";
pub const REALM_ID: u32 = 22;
pub const GUILD_ID: u32 = 39104;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_ERROR_DETAILS: usize = 500;
pub const GUILD_FETCH_ATTEMPTS: u32 = 3;
pub const FORBIDDEN_BACKOFF_MIN: Duration = Duration::from_millis(1000);
pub const FORBIDDEN_BACKOFF_MAX: Duration = Duration::from_millis(3000);
pub const TRANSPORT_BACKOFF_STEP: Duration = Duration::from_secs(1);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const SERVER_PORT: u16 = 3000;
