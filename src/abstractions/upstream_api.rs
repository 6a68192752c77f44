use log::{debug, info};
use reqwest::{header::HeaderMap, Client, RequestBuilder, Response};

use crate::error::ApiError;
use crate::models::*;
use crate::retry::{with_retry, RetryPolicy};
use crate::settings::UpstreamSettings;

#[cfg(test)]
use mockall::automock;

/// One call to the latest boss kills endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillsRequest {
    pub page: u32,
    pub week: Option<WeekWindow>,
    pub raid_index: Option<u32>,
    pub boss: Option<u32>,
}

impl KillsRequest {
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Default::default()
        }
    }

    pub fn is_narrowed(&self) -> bool {
        self.week.is_some() || self.raid_index.is_some() || self.boss.is_some()
    }

    pub fn query_pairs(&self, guild_id: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("guild", guild_id.to_string()),
            ("page", self.page.to_string()),
        ];

        if let Some(week) = &self.week {
            pairs.push(("week_from", week.from.clone()));
            pairs.push(("week_to", week.to.clone()));
        }

        if let Some(raid_index) = self.raid_index {
            pairs.push(("i", raid_index.to_string()));
        }

        if let Some(boss) = self.boss {
            pairs.push(("boss", boss.to_string()));
        }

        pairs
    }
}

#[cfg_attr(test, automock)]
pub trait UpstreamApi : Send + Sync + 'static {
    async fn latest_kills(&self, request: &KillsRequest) -> Result<UpstreamPage, ApiError>;
    async fn pve_info(&self) -> Result<Vec<InstanceDescriptor>, ApiError>;
    async fn guild(&self) -> Result<GuildRoster, ApiError>;
}

pub struct DefaultUpstreamApi {
    client: Client,
    settings: UpstreamSettings,
    retry_policy: RetryPolicy,
}

impl UpstreamApi for DefaultUpstreamApi {
    async fn latest_kills(&self, request: &KillsRequest) -> Result<UpstreamPage, ApiError> {
        let url = format!("{}/progression/pve/latest-boss-kills", self.settings.realm_url());

        let response = self
            .get(&url, 0)
            .query(&request.query_pairs(self.settings.guild_id))
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let headers = page_headers(response.headers());
        let payload = response.json::<LatestKillsPayload>().await?;

        debug!(
            "received {} kills, {} instances, {} weeks for page {}",
            payload.data.len(),
            payload.instances.len(),
            payload.weeks.len(),
            request.page
        );

        Ok(UpstreamPage { payload, headers })
    }

    async fn pve_info(&self) -> Result<Vec<InstanceDescriptor>, ApiError> {
        let url = format!("{}/pve-info", self.settings.realm_url());

        let response = self
            .get(&url, 0)
            .query(&[("encounters", "true")])
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let payload = response.json::<PveInfoPayload>().await?;

        Ok(payload.data)
    }

    async fn guild(&self) -> Result<GuildRoster, ApiError> {
        let roster = with_retry(&self.retry_policy, |attempt| self.guild_attempt(attempt)).await?;
        info!("received guild roster with {} members", roster.members.len());

        Ok(roster)
    }
}

impl DefaultUpstreamApi {
    pub fn new(settings: UpstreamSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
            retry_policy: RetryPolicy::default(),
        }
    }

    async fn guild_attempt(&self, attempt: u32) -> Result<GuildRoster, ApiError> {
        let url = format!("{}/guild/{}", self.settings.realm_url(), self.settings.guild_id);

        let response = self.get(&url, attempt).send().await?;
        let response = ensure_success(response).await?;

        Ok(response.json::<GuildRoster>().await?)
    }

    // Retries go out with a different browser version in the user agent.
    fn get(&self, url: &str, attempt: u32) -> RequestBuilder {
        let user_agent = if attempt == 0 {
            self.settings.user_agent.clone()
        } else {
            format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
                120 + attempt
            )
        };

        let origin = self.settings.image_origin.trim_end_matches('/');

        self.client
            .get(url)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
            .header("User-Agent", user_agent)
            .header("Referer", format!("{origin}/"))
            .header("Origin", origin)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let details = response.text().await.unwrap_or_default();

    Err(ApiError::upstream(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        &details,
    ))
}

pub fn page_headers(headers: &HeaderMap) -> PageHeaders {
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    PageHeaders {
        total_pages: value("X-Total-Pages"),
        current_page: value("X-Current-Page"),
        per_page: value("X-Per-Page"),
        total_count: value("X-Total-Count"),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;
    use crate::test_utils::*;

    #[test]
    fn should_build_primary_query() {
        let request = KillsRequest::page(0);

        assert_eq!(request.page, 1);
        assert!(!request.is_narrowed());
        assert_eq!(
            request.query_pairs(39104),
            vec![("guild", "39104".to_string()), ("page", "1".to_string())]
        );
    }

    #[test]
    fn should_build_narrowed_query() {
        let request = KillsRequest {
            page: 2,
            week: Some(week("previous", "2026-10-07", "2026-10-14")),
            raid_index: Some(8),
            boss: Some(3),
        };

        let pairs = request.query_pairs(39104);

        assert!(request.is_narrowed());
        assert_eq!(
            pairs,
            vec![
                ("guild", "39104".to_string()),
                ("page", "2".to_string()),
                ("week_from", "2026-10-07".to_string()),
                ("week_to", "2026-10-14".to_string()),
                ("i", "8".to_string()),
                ("boss", "3".to_string()),
            ]
        );
    }

    #[test]
    fn should_extract_pagination_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-total-pages", HeaderValue::from_static("4"));
        headers.insert("x-total-count", HeaderValue::from_static("71"));

        let page_headers = page_headers(&headers);

        assert_eq!(page_headers.total_pages.as_deref(), Some("4"));
        assert_eq!(page_headers.total_count.as_deref(), Some("71"));
        assert_eq!(page_headers.current_page, None);
        assert_eq!(page_headers.per_page, None);
    }
}
