use log::{error, info, warn};

use crate::abstractions::{KillsRequest, UpstreamApi};
use crate::aggregator::aggregate_kills;
use crate::catalog::InstanceCatalog;
use crate::error::ApiError;
use crate::filters::{boss_options, raid_options, selectable_raids};
use crate::models::LatestKillsView;
use crate::pagination::{reconcile, PaginationPatch};
use crate::raid_index::RaidIndexResolver;
use crate::week_window::resolve_week_window;

use super::{DefaultDashboard, KillsQuery};

impl<UA, RI> DefaultDashboard<UA, RI>
where
    UA: UpstreamApi,
    RI: RaidIndexResolver,
{
    pub async fn on_latest_kills(&self, query: &KillsQuery) -> Result<LatestKillsView, ApiError> {
        let page = query.page.max(1);

        let primary = self
            .upstream_api
            .latest_kills(&KillsRequest::page(page))
            .await
            .inspect_err(|err| error!("failed to fetch latest kills page {}: {}", page, err))?;

        let mut catalog = InstanceCatalog::new();
        catalog.merge(&primary.payload.instances);

        let (raid_index, boss) = self.selectable_filter(&catalog, query);

        let week = query
            .period
            .and_then(|period| resolve_week_window(period, &primary.payload.weeks))
            .cloned();

        // Without a date window the filters only matter when a raid is picked.
        let narrowed = if week.is_some() || raid_index.is_some() {
            Some(KillsRequest {
                page,
                week,
                raid_index,
                boss,
            })
        } else {
            None
        };

        let mut filter_degraded = false;

        let (payload, headers) = match narrowed {
            None => (primary.payload, Some(primary.headers)),
            Some(request) => match self.upstream_api.latest_kills(&request).await {
                Ok(narrowed) => {
                    let added = catalog.merge(&narrowed.payload.instances);
                    info!("narrowed fetch returned {} kills, {} new instances", narrowed.payload.data.len(), added);
                    (narrowed.payload, Some(narrowed.headers))
                }
                Err(err) => {
                    warn!("narrowed fetch failed, serving unfiltered page {}: {}", page, err);
                    filter_degraded = true;
                    (primary.payload, None)
                }
            },
        };

        let kills = aggregate_kills(&payload.data, &catalog, &self.image_origin);

        let patches: Vec<PaginationPatch> = payload
            .meta
            .as_ref()
            .and_then(PaginationPatch::from_body)
            .into_iter()
            .chain(headers.as_ref().and_then(PaginationPatch::from_headers))
            .collect();

        let pagination = reconcile(page, payload.data.len(), &patches);

        let raids = raid_options(&catalog, &*self.raid_index);

        let bosses = raid_index
            .map(|raid_index| boss_options(&catalog, &*self.raid_index, raid_index, &self.image_origin))
            .unwrap_or_default();

        Ok(LatestKillsView {
            kills,
            pagination,
            raids,
            bosses,
            filter_degraded,
        })
    }

    // A raid index no selectable option carries is dropped, and the boss
    // filter with it since boss orders only mean something within a raid.
    fn selectable_filter(&self, catalog: &InstanceCatalog, query: &KillsQuery) -> (Option<u32>, Option<u32>) {
        let Some(raid_index) = query.raid_index else {
            return (None, query.boss);
        };

        let options = raid_options(catalog, &*self.raid_index);

        if selectable_raids(&options)
            .iter()
            .any(|option| option.filter_index == Some(raid_index))
        {
            return (Some(raid_index), query.boss);
        }

        warn!("raid filter {} matches no selectable raid, ignoring raid and boss filters", raid_index);

        (None, None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::abstractions::MockUpstreamApi;
    use crate::constants::IMAGE_ORIGIN;
    use crate::dashboard::{DefaultDashboard, KillsQuery};
    use crate::error::ApiError;
    use crate::models::{PageHeaders, PageMeta};
    use crate::raid_index::RaidIndexTable;
    use crate::test_utils::*;
    use crate::week_window::PeriodKey;

    fn dashboard(upstream_api: MockUpstreamApi) -> DefaultDashboard<MockUpstreamApi, RaidIndexTable> {
        DefaultDashboard::new(
            Arc::new(upstream_api),
            Arc::new(RaidIndexTable::embedded().unwrap()),
            IMAGE_ORIGIN.to_string(),
        )
    }

    #[tokio::test]
    async fn should_narrow_by_resolved_week() {
        let primary = PageBuilder::new()
            .instances(vec![naxxramas(1)])
            .kills(vec![kill(1, 533, 1, 1)])
            .week("current", "2026-10-14", "2026-10-21")
            .build();
        let narrowed = PageBuilder::new()
            .instances(vec![naxxramas(1)])
            .kills(vec![kill(2, 533, 1, 2), kill(3, 533, 1, 3)])
            .build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(
                |request| {
                    request.week.as_ref().is_some_and(|week| week.from == "2026-10-14")
                        && request.raid_index.is_none()
                },
                Ok(narrowed),
            )
            .build();

        let view = dashboard(upstream_api)
            .on_latest_kills(&KillsQuery::default())
            .await
            .unwrap();

        assert_eq!(view.kills.iter().map(|kill| kill.id).collect::<Vec<_>>(), vec![3, 2]);
        assert!(!view.filter_degraded);
    }

    #[tokio::test]
    async fn should_skip_narrowing_when_week_missing() {
        let primary = PageBuilder::new()
            .instances(vec![naxxramas(1)])
            .kills(vec![kill(1, 533, 1, 1), kill(4, 533, 1, 2)])
            .week("current", "2026-10-14", "2026-10-21")
            .build();
        let upstream_api = UpstreamApiBuilder::new().primary(1, Ok(primary)).build();
        let query = KillsQuery {
            period: Some(PeriodKey::LastFourWeeks),
            ..Default::default()
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert_eq!(view.kills.iter().map(|kill| kill.id).collect::<Vec<_>>(), vec![4, 1]);
        assert!(!view.filter_degraded);
    }

    #[tokio::test]
    async fn should_narrow_by_raid_without_week() {
        let primary = PageBuilder::new().instances(vec![naxxramas(3), ulduar(1)]).build();
        let narrowed = PageBuilder::new().kills(vec![kill(9, 533, 3, 1)]).build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(
                |request| request.week.is_none() && request.raid_index == Some(8) && request.boss == Some(1),
                Ok(narrowed),
            )
            .build();
        let query = KillsQuery {
            period: None,
            page: 1,
            raid_index: Some(8),
            boss: Some(1),
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert_eq!(view.kills.len(), 1);
        assert_eq!(view.bosses.iter().map(|boss| boss.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_ignore_boss_without_raid_or_week() {
        let primary = PageBuilder::new().instances(vec![naxxramas(3)]).build();
        let upstream_api = UpstreamApiBuilder::new().primary(1, Ok(primary)).build();
        let query = KillsQuery {
            period: None,
            boss: Some(2),
            ..Default::default()
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert!(view.bosses.is_empty());
    }

    #[tokio::test]
    async fn should_ignore_raid_filter_no_selectable_raid_carries() {
        let primary = PageBuilder::new()
            .instances(vec![instance(409, 1, "Огненные Недра"), naxxramas(1)])
            .week("current", "2026-10-14", "2026-10-21")
            .build();
        let narrowed = PageBuilder::new().kills(vec![kill(4, 533, 1, 1)]).build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(
                |request| request.week.is_some() && request.raid_index.is_none() && request.boss.is_none(),
                Ok(narrowed),
            )
            .build();
        let query = KillsQuery {
            raid_index: Some(99),
            boss: Some(2),
            ..Default::default()
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert_eq!(view.kills.len(), 1);
        assert!(view.bosses.is_empty());
        assert_eq!(view.raids.len(), 2);
        assert!(view.raids.iter().any(|raid| raid.filter_index.is_none()));
    }

    #[tokio::test]
    async fn should_skip_narrowing_for_unselectable_raid_without_week() {
        let primary = PageBuilder::new()
            .instances(vec![instance(409, 1, "Огненные Недра")])
            .build();
        let upstream_api = UpstreamApiBuilder::new().primary(1, Ok(primary)).build();
        let query = KillsQuery {
            period: None,
            raid_index: Some(4),
            ..Default::default()
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert!(view.bosses.is_empty());
        assert!(!view.filter_degraded);
    }

    #[tokio::test]
    async fn should_fall_back_to_primary_when_narrowed_fetch_fails() {
        let primary = PageBuilder::new()
            .instances(vec![ulduar(1)])
            .kills(vec![kill(5, 603, 1, 1)])
            .week("previous", "2026-10-07", "2026-10-14")
            .headers(PageHeaders {
                total_pages: Some("6".into()),
                ..Default::default()
            })
            .build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(
                |request| request.week.is_some(),
                Err(ApiError::upstream(500, "Internal Server Error", "boom")),
            )
            .build();
        let query = KillsQuery {
            period: Some(PeriodKey::Previous),
            ..Default::default()
        };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert!(view.filter_degraded);
        assert_eq!(view.kills.len(), 1);
        assert_eq!(view.kills[0].id, 5);
        // headers of the unfiltered page are not trusted for a degraded answer
        assert_eq!(view.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn should_fail_when_primary_fetch_fails() {
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Err(ApiError::upstream(403, "Forbidden", "blocked")))
            .build();

        let err = dashboard(upstream_api)
            .on_latest_kills(&KillsQuery::default())
            .await
            .unwrap_err();

        assert_eq!(err.status(), 403);
        assert_eq!(err.details(), "blocked");
    }

    #[tokio::test]
    async fn should_merge_catalog_first_writer_wins() {
        let mut partial = naxxramas(1);
        partial.name = "Наксрамас (фильтр)".into();
        let primary = PageBuilder::new()
            .instances(vec![naxxramas(1)])
            .week("current", "2026-10-14", "2026-10-21")
            .build();
        let narrowed = PageBuilder::new()
            .instances(vec![partial, ulduar(0)])
            .kills(vec![kill(1, 533, 1, 1), kill(2, 603, 0, 2)])
            .build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(|_| true, Ok(narrowed))
            .build();

        let view = dashboard(upstream_api).on_latest_kills(&KillsQuery::default()).await.unwrap();

        assert_eq!(view.kills.len(), 2);
        assert!(view.kills.iter().any(|kill| kill.raid_name == "Наксрамас"));
        assert_eq!(view.raids.len(), 2);
        assert!(view.raids.iter().all(|raid| raid.name != "Наксрамас (фильтр)"));
    }

    #[tokio::test]
    async fn should_drop_kills_missing_from_catalog() {
        let primary = PageBuilder::new()
            .instances(vec![naxxramas(1), ulduar(0)])
            .kills(vec![kill(1, 533, 1, 1), kill(2, 603, 1, 1), kill(3, 603, 0, 2)])
            .build();
        let upstream_api = UpstreamApiBuilder::new().primary(1, Ok(primary)).build();
        let query = KillsQuery { period: None, ..Default::default() };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert_eq!(view.kills.len(), 2);
    }

    #[tokio::test]
    async fn should_reconcile_empty_deep_page() {
        let primary = PageBuilder::new().instances(vec![naxxramas(1)]).build();
        let upstream_api = UpstreamApiBuilder::new().primary(3, Ok(primary)).build();
        let query = KillsQuery { period: None, page: 3, ..Default::default() };

        let view = dashboard(upstream_api).on_latest_kills(&query).await.unwrap();

        assert_eq!(view.pagination.total_pages, 2);
        assert_eq!(view.pagination.current_page, 2);
    }

    #[tokio::test]
    async fn should_take_pagination_from_narrowed_body() {
        let primary = PageBuilder::new()
            .instances(vec![naxxramas(1)])
            .week("current", "2026-10-14", "2026-10-21")
            .headers(PageHeaders {
                total_pages: Some("40".into()),
                ..Default::default()
            })
            .build();
        let narrowed = PageBuilder::new()
            .kills((1..=20).map(|id| kill(id, 533, 1, 1)).collect())
            .meta(PageMeta {
                current_page: Some(1),
                last_page: Some(3),
                per_page: Some(20),
                total: Some(55),
            })
            .build();
        let upstream_api = UpstreamApiBuilder::new()
            .primary(1, Ok(primary))
            .narrowed(|_| true, Ok(narrowed))
            .build();

        let view = dashboard(upstream_api).on_latest_kills(&KillsQuery::default()).await.unwrap();

        assert_eq!(view.pagination.total_pages, 3);
        assert_eq!(view.pagination.total, 55);
        assert_eq!(view.kills.len(), 20);
    }
}
