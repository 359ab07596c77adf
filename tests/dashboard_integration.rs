//! Dashboard Integration Tests
//!
//! These tests verify the home screen flow:
//! - Overview block resolution (dashboard, fallback, disabled, missing)
//! - Refresh invalidation and reading strategies
//! - Stale load handling and disposal
//! - Events, tabs and navigation
//! - The HTTP dashboard source against a mock site

mod common;

use std::sync::Arc;

use campus::adapters::mock::MockOverviewBlock;
use campus::adapters::http_dashboard::DASHBOARD_WS_FUNCTION;
use campus::adapters::{HttpDashboardSource, ReqwestHttpClient};
use campus::error::{CampusError, ErrorCategory, NetworkError};
use campus::events::AppEvent;
use campus::home::{OverviewSource, MY_COURSES_VIEW_WS};
use campus::models::{
    DashboardBlock, DashboardBlocks, DashboardOptions, HomeHandler, ReadingStrategy, SiteVersion,
    MY_PAGE_COURSES, SIDE_REGION,
};
use campus::traits::DashboardSource;
use campus::view_state::ViewCommand;
use common::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Helpers
// ============================================================================

fn dashboard_with_overview() -> DashboardBlocks {
    DashboardBlocks::from_blocks(vec![
        DashboardBlock {
            instance_id: Some(31),
            ..DashboardBlock::new("myoverview")
        },
        DashboardBlock::new("calendar_upcoming").in_region(SIDE_REGION),
    ])
}

// ============================================================================
// Overview resolution
// ============================================================================

#[tokio::test]
async fn test_overview_found_in_dashboard() {
    let harness = HomeHarness::new();
    harness.dashboard.set_blocks(dashboard_with_overview());
    let (mut home, _rx) = harness.controller();

    home.initialize().await.unwrap();

    assert!(home.is_loaded());
    assert_eq!(home.loaded_block().and_then(|b| b.instance_id), Some(31));
    assert!(home.has_side_blocks());
    assert_eq!(
        home.loader().outcome().map(|o| o.source),
        Some(OverviewSource::Dashboard)
    );
    assert_eq!(
        harness.dashboard.requests()[0],
        DashboardOptions {
            my_page: Some(MY_PAGE_COURSES.to_string()),
            reading_strategy: ReadingStrategy::PreferCache,
        }
    );
}

#[tokio::test]
async fn test_unavailable_dashboard_uses_fallback() {
    let harness = HomeHarness::new();
    harness.dashboard.set_available(false);
    let (mut home, _rx) = harness.controller();

    home.initialize().await.unwrap();

    assert_eq!(home.loaded_block(), Some(&DashboardBlock::fallback_overview()));
    assert!(!home.has_side_blocks());
    assert_eq!(harness.dashboard.fetch_count(), 0);
}

#[tokio::test]
async fn test_disabled_my_courses_shows_nothing() {
    let harness = HomeHarness::new();
    harness.dashboard.set_my_courses_disabled(true);
    let (mut home, _rx) = harness.controller();

    home.initialize().await.unwrap();

    assert!(home.is_loaded());
    assert_eq!(home.loaded_block(), None);
    assert_eq!(
        home.loader().outcome().map(|o| o.source),
        Some(OverviewSource::Disabled)
    );
}

#[tokio::test]
async fn test_fetch_failure_falls_back_with_notice() {
    let harness = HomeHarness::new();
    harness.dashboard.set_should_fail(true);
    let (mut home, mut rx) = harness.controller();

    home.initialize().await.unwrap();

    assert_eq!(home.loaded_block(), Some(&DashboardBlock::fallback_overview()));
    let commands = drain(&mut rx);
    assert!(commands
        .iter()
        .any(|c| matches!(c, ViewCommand::ShowError { .. })));
}

#[tokio::test]
async fn test_old_site_without_overview_gets_fallback() {
    let mut harness = HomeHarness::new();
    harness.dashboard = harness
        .dashboard
        .clone()
        .with_version(SiteVersion::new(3, 11, 0));
    harness.dashboard.set_blocks(DashboardBlocks::from_blocks(vec![
        DashboardBlock::new("calendar_upcoming").in_region(SIDE_REGION),
    ]));
    let (mut home, _rx) = harness.controller();

    home.initialize().await.unwrap();

    assert_eq!(home.loaded_block(), Some(&DashboardBlock::fallback_overview()));
    assert!(!home.has_side_blocks());
    assert_eq!(harness.dashboard.requests()[0].my_page, None);
}

#[tokio::test]
async fn test_new_site_without_overview_is_missing() {
    let harness = HomeHarness::new();
    harness.dashboard.set_blocks(DashboardBlocks::from_blocks(vec![
        DashboardBlock::new("timeline"),
    ]));
    let (mut home, _rx) = harness.controller();

    home.initialize().await.unwrap();

    assert_eq!(home.loaded_block(), None);
    assert_eq!(
        home.loader().outcome().map(|o| o.source),
        Some(OverviewSource::Missing)
    );
}

// ============================================================================
// Refresh, stale loads, disposal
// ============================================================================

#[tokio::test]
async fn test_refresh_invalidates_and_goes_to_network() {
    let harness = HomeHarness::new();
    harness.dashboard.set_blocks(dashboard_with_overview());
    let overview = MockOverviewBlock::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();
    home.attach_overview_block(Arc::new(overview.clone()));

    home.refresh().await.unwrap();

    assert_eq!(
        harness.dashboard.invalidations(),
        vec![Some(MY_PAGE_COURSES.to_string())]
    );
    assert_eq!(overview.invalidation_count(), 1);
    let requests = harness.dashboard.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].reading_strategy, ReadingStrategy::PreferNetwork);
    assert_eq!(home.loader().completed_loads(), 2);
}

#[tokio::test]
async fn test_refresh_ignores_invalidation_failures() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();
    home.attach_overview_block(Arc::new(MockOverviewBlock::failing()));

    home.refresh().await.unwrap();

    assert_eq!(home.loader().completed_loads(), 2);
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();

    harness.dashboard.set_available(false);
    let (first_ticket, first_fetch) = home.start_load();
    let first = first_fetch.await;

    harness.dashboard.set_available(true);
    harness.dashboard.set_blocks(dashboard_with_overview());
    let (second_ticket, second_fetch) = home.start_load();
    let second = second_fetch.await;

    assert!(home.finish_load(second_ticket, second).await);
    assert!(!home.finish_load(first_ticket, first).await);
    assert_eq!(home.loaded_block().and_then(|b| b.instance_id), Some(31));
}

#[tokio::test]
async fn test_dispose_ignores_late_completion() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();
    assert_eq!(harness.events.subscriber_count(), 1);

    let (ticket, fetch) = home.start_load();
    home.dispose();
    let outcome = fetch.await;

    assert!(!home.finish_load(ticket, outcome).await);
    assert_eq!(harness.events.subscriber_count(), 0);
    assert_eq!(home.loader().completed_loads(), 1);
}

#[tokio::test]
async fn test_view_logged_once() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();
    home.refresh().await.unwrap();

    assert_eq!(harness.service.my_courses_log_count(), 1);
    let events = harness.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ws, MY_COURSES_VIEW_WS);
    assert_eq!(events[0].url, "/my/courses.php");
}

#[tokio::test]
async fn test_ready_signal_after_first_load() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    let ready = home.ready();
    assert!(!ready.is_ready());

    home.initialize().await.unwrap();

    ready.clone().wait().await;
    assert!(ready.is_ready());
}

// ============================================================================
// Events, tabs and navigation
// ============================================================================

#[tokio::test]
async fn test_site_updated_refreshes_site_values() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();
    assert!(home.download_courses_enabled());

    harness.site.set_name("Renamed school");
    harness.site.set_download_courses_disabled(true);
    harness.events.publish(AppEvent::SiteUpdated {
        site_id: "another-site".to_string(),
    });
    home.process_events().await.unwrap();
    assert_eq!(home.site_name(), "Test site");

    harness.events.publish(AppEvent::SiteUpdated {
        site_id: SITE_ID.to_string(),
    });
    home.process_events().await.unwrap();
    assert_eq!(home.site_name(), "Renamed school");
    assert!(!home.download_courses_enabled());
}

#[tokio::test]
async fn test_refresh_page_event_reloads() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();
    home.initialize().await.unwrap();

    harness.events.publish(AppEvent::RefreshPage);
    assert_eq!(home.process_events().await.unwrap(), 1);

    assert_eq!(harness.dashboard.fetch_count(), 2);
    assert!(home.is_loaded());
}

#[tokio::test]
async fn test_tabs_follow_handlers() {
    let harness = HomeHarness::new();
    let (mut home, _rx) = harness.controller();

    home.on_handlers(
        &[
            HomeHandler::new("Dashboard", "dashboard", 1100),
            HomeHandler::new("My courses", "courses", 1300),
        ],
        true,
    );

    let titles: Vec<&str> = home.tabs().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["My courses", "Dashboard"]);
    assert!(home.tabs_loaded());
}

#[tokio::test]
async fn test_search_and_notifications_navigate() {
    let harness = HomeHarness::new();
    let (home, mut rx) = harness.controller();

    home.open_search();
    home.open_notifications();

    let paths: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter_map(|c| match c {
            ViewCommand::Navigate(request) => Some(request.path),
            _ => None,
        })
        .collect();
    assert_eq!(paths, vec!["/courses/list", "/notifications/list"]);
}

// ============================================================================
// HTTP dashboard source
// ============================================================================

#[tokio::test]
async fn test_http_source_against_mock_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webservice/rest/server.php"))
        .and(query_param("wsfunction", "core_block_get_dashboard_blocks"))
        .and(query_param("wstoken", "secret"))
        .and(query_param("mypage", MY_PAGE_COURSES))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "blocks": [
                {"instanceid": 8, "name": "myoverview", "region": "content"},
                {"instanceid": 9, "name": "timeline", "region": "side-pre"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpDashboardSource::new(
        Arc::new(ReqwestHttpClient::new()),
        server.uri(),
        "secret",
        SiteVersion::new(4, 2, 0),
    );
    let options = DashboardOptions {
        my_page: Some(MY_PAGE_COURSES.to_string()),
        reading_strategy: ReadingStrategy::PreferCache,
    };

    let blocks = source.get_dashboard_blocks(&options).await.unwrap();
    assert_eq!(blocks.overview().and_then(|b| b.instance_id), Some(8));
    assert_eq!(blocks.side_blocks.len(), 1);

    // Served from the cache; the mock expects a single request.
    source.get_dashboard_blocks(&options).await.unwrap();
}

#[tokio::test]
async fn test_http_source_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = HttpDashboardSource::new(
        Arc::new(ReqwestHttpClient::new()),
        server.uri(),
        "secret",
        SiteVersion::new(4, 2, 0),
    );
    let err = source
        .get_dashboard_blocks(&DashboardOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Server);
    assert!(matches!(
        err.inner(),
        CampusError::Network(NetworkError::HttpStatus { status: 500, .. })
    ));
    assert_eq!(
        err.context().map(|c| c.operation.as_str()),
        Some(DASHBOARD_WS_FUNCTION)
    );
}
