use serde::Serialize;

use crate::constants::DEFAULT_PER_PAGE;
use crate::models::{PageHeaders, PageMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Where a patch came from. Declaration order is trust order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetadataSource {
    Body,
    Headers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPatch {
    pub source: MetadataSource,
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
}

impl PaginationPatch {
    /// Body metadata only counts when it carries a positive `last_page`.
    pub fn from_body(meta: &PageMeta) -> Option<Self> {
        let last_page = meta.last_page.filter(|&last_page| last_page > 0)?;

        Some(Self {
            source: MetadataSource::Body,
            current_page: meta.current_page,
            total_pages: Some(last_page),
            per_page: meta.per_page,
            total: meta.total,
        })
    }

    pub fn from_headers(headers: &PageHeaders) -> Option<Self> {
        let patch = Self {
            source: MetadataSource::Headers,
            current_page: parse_header(&headers.current_page),
            total_pages: parse_header(&headers.total_pages),
            per_page: parse_header(&headers.per_page),
            total: parse_header(&headers.total_count),
        };

        if patch.is_empty() {
            return None;
        }

        Some(patch)
    }

    fn is_empty(&self) -> bool {
        self.current_page.is_none()
            && self.total_pages.is_none()
            && self.per_page.is_none()
            && self.total.is_none()
    }

    fn apply(&self, state: &mut PaginationState) {
        if let Some(current_page) = self.current_page {
            state.current_page = current_page;
        }

        if let Some(total_pages) = self.total_pages {
            state.total_pages = total_pages;
        }

        if let Some(per_page) = self.per_page.filter(|&per_page| per_page > 0) {
            state.per_page = per_page;
        }

        if let Some(total) = self.total {
            state.total = total;
        }
    }
}

fn parse_header<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|value| value.trim().parse().ok())
}

/// Builds one consistent pagination state out of the upstream's signals.
///
/// Only the most trusted patch is applied. The observed item count then
/// corrects the page range and the page range caps the reported total.
pub fn reconcile(requested_page: u32, raw_count: usize, patches: &[PaginationPatch]) -> PaginationState {
    let page = requested_page.max(1);
    let raw_count = raw_count as u64;

    let mut state = PaginationState {
        current_page: page,
        total_pages: 1,
        per_page: DEFAULT_PER_PAGE,
        total: raw_count,
    };

    if let Some(patch) = patches.iter().min_by_key(|patch| patch.source) {
        patch.apply(&mut state);
    }

    if raw_count == 0 && page > 1 {
        state.total_pages = page - 1;
        state.current_page = state.current_page.min(state.total_pages);
    } else if raw_count > 0 && raw_count < state.per_page as u64 && page > 1 {
        state.total_pages = page;
    } else if raw_count == 0 && page == 1 {
        state.total_pages = 1;
    } else if raw_count > 0 && state.total_pages < page {
        state.total_pages = page;
    }

    let capacity = state.total_pages as u64 * state.per_page as u64;
    if capacity < state.total {
        state.total = capacity;
    }

    state.total_pages = state.total_pages.max(1);
    state.current_page = state.current_page.clamp(1, state.total_pages);

    state
}
