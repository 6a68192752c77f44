use crate::abstractions::{KillsRequest, MockUpstreamApi};
use crate::error::ApiError;
use crate::models::*;

use super::week;

pub struct PageBuilder {
    page: UpstreamPage,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            page: UpstreamPage::default(),
        }
    }

    pub fn kills(mut self, kills: Vec<KillRecord>) -> Self {
        self.page.payload.data = kills;
        self
    }

    pub fn instances(mut self, instances: Vec<InstanceDescriptor>) -> Self {
        self.page.payload.instances = instances;
        self
    }

    pub fn week(mut self, key: &str, from: &str, to: &str) -> Self {
        self.page.payload.weeks.push(week(key, from, to));
        self
    }

    pub fn meta(mut self, meta: PageMeta) -> Self {
        self.page.payload.meta = Some(meta);
        self
    }

    pub fn headers(mut self, headers: PageHeaders) -> Self {
        self.page.headers = headers;
        self
    }

    pub fn build(self) -> UpstreamPage {
        self.page
    }
}

/// Sets up upstream expectations. Every scripted call must happen exactly once.
pub struct UpstreamApiBuilder {
    upstream_api: MockUpstreamApi,
}

impl UpstreamApiBuilder {
    pub fn new() -> Self {
        Self {
            upstream_api: MockUpstreamApi::new(),
        }
    }

    /// The unfiltered fetch of `page`.
    pub fn primary(mut self, page: u32, result: Result<UpstreamPage, ApiError>) -> Self {
        self.upstream_api
            .expect_latest_kills()
            .withf(move |request| request.page == page && !request.is_narrowed())
            .times(1)
            .return_once(move |_| result);
        self
    }

    /// A narrowed fetch whose request satisfies `matcher`.
    pub fn narrowed<P>(mut self, matcher: P, result: Result<UpstreamPage, ApiError>) -> Self
    where
        P: Fn(&KillsRequest) -> bool + Send + 'static,
    {
        self.upstream_api
            .expect_latest_kills()
            .withf(move |request| request.is_narrowed() && matcher(request))
            .times(1)
            .return_once(move |_| result);
        self
    }

    pub fn pve_info(mut self, result: Result<Vec<InstanceDescriptor>, ApiError>) -> Self {
        self.upstream_api
            .expect_pve_info()
            .times(1)
            .return_once(move || result);
        self
    }

    pub fn guild(mut self, result: Result<GuildRoster, ApiError>) -> Self {
        self.upstream_api
            .expect_guild()
            .times(1)
            .return_once(move || result);
        self
    }

    pub fn build(self) -> MockUpstreamApi {
        self.upstream_api
    }
}
