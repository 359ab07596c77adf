//! Per-course preference tests against the in-memory and file stores.

mod common;

use std::sync::Arc;

use campus::adapters::mock::InMemoryPreferences;
use campus::adapters::FilePreferenceStore;
use campus::course::preferences::{all_sections_preferred_key, expanded_sections_key};
use campus::course::{CourseInputs, CoursePreferences, ExpandedSections};
use campus::models::ALL_SECTIONS_ID;
use campus::traits::PreferenceStore;
use campus::view_state::ViewCommand;
use common::*;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_expanded_set_stored_form() {
    let set = ExpandedSections::from_ids([3, 7, 3, ALL_SECTIONS_ID]);
    assert_eq!(set.to_stored(), "3,7");
    assert_eq!(ExpandedSections::from_stored("3,7"), set);
    assert_eq!(ExpandedSections::from_stored(" 3 , x, 7,"), set);
    assert!(ExpandedSections::from_stored("").is_empty());
}

#[tokio::test]
async fn test_expanded_sections_through_file_store() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FilePreferenceStore::in_dir(dir.path(), "site"));
    let preferences = CoursePreferences::new(store.clone(), 42);

    assert_eq!(preferences.expanded_sections().await, None);

    preferences
        .save_expanded_sections(&ExpandedSections::from_ids([3, 7]))
        .await;
    assert_eq!(
        store.get(&expanded_sections_key(42)).await.unwrap(),
        Some(json!("3,7"))
    );

    let reopened = CoursePreferences::new(
        Arc::new(FilePreferenceStore::in_dir(dir.path(), "site")),
        42,
    );
    assert_eq!(
        reopened.expanded_sections().await,
        Some(ExpandedSections::from_ids([3, 7]))
    );
}

#[tokio::test]
async fn test_numeric_expanded_value_is_single_id() {
    let store = InMemoryPreferences::new().with_value(&expanded_sections_key(1), json!(9));
    let preferences = CoursePreferences::new(Arc::new(store), 1);
    assert_eq!(
        preferences.expanded_sections().await,
        Some(ExpandedSections::from_ids([9]))
    );
}

#[tokio::test]
async fn test_all_sections_flag_defaults_and_failures() {
    let store = InMemoryPreferences::new();
    let preferences = CoursePreferences::new(Arc::new(store.clone()), 5);

    assert!(!preferences.all_sections_preferred().await);

    preferences.set_all_sections_preferred(true).await;
    assert_eq!(store.value(&all_sections_preferred_key(5)), Some(json!(1)));
    assert!(preferences.all_sections_preferred().await);

    store.set_read_should_fail(true);
    assert!(!preferences.all_sections_preferred().await);

    store.set_read_should_fail(false);
    store.set_write_should_fail(true);
    preferences.set_all_sections_preferred(false).await;
    assert!(preferences.all_sections_preferred().await);
}

#[tokio::test]
async fn test_selecting_sections_records_preference() {
    let harness = CourseHarness::new();
    let (mut controller, _rx) =
        harness.controller(CourseInputs::new(course(), course_sections()));
    controller.initialize().await.unwrap();

    controller.section_changed(ALL_SECTIONS_ID, None).await.unwrap();
    assert_eq!(
        harness.preferences.value(&all_sections_preferred_key(42)),
        Some(json!(1))
    );

    controller.section_changed(11, None).await.unwrap();
    assert_eq!(
        harness.preferences.value(&all_sections_preferred_key(42)),
        Some(json!(0))
    );
}

#[tokio::test]
async fn test_accordion_change_persists_and_requests_scroll_check() {
    let harness = CourseHarness::new();
    let (mut controller, mut rx) =
        harness.controller(CourseInputs::new(course(), course_sections()));
    controller.initialize().await.unwrap();
    drain(&mut rx);

    controller.apply_accordion_change(&[10, 12]).await.unwrap();

    assert_eq!(
        harness.preferences.value(&expanded_sections_key(42)),
        Some(json!("10,12"))
    );
    let expanded: Vec<i64> = controller
        .sections()
        .iter()
        .filter(|s| s.expanded)
        .map(|s| s.id)
        .collect();
    assert_eq!(expanded, vec![10, 12]);
    assert_eq!(drain(&mut rx), vec![ViewCommand::CheckInfiniteScroll]);
}

#[tokio::test]
async fn test_stored_expanded_sections_applied_on_initialize() {
    let harness = CourseHarness::new();
    harness
        .preferences
        .set(&expanded_sections_key(42), json!("12"))
        .await
        .unwrap();
    let (mut controller, _rx) =
        harness.controller(CourseInputs::new(course(), course_sections()));

    controller.initialize().await.unwrap();

    let section = |id: i64| controller.sections().iter().find(|s| s.id == id).unwrap();
    assert!(section(12).expanded);
    assert!(!section(11).expanded);
}

#[tokio::test]
async fn test_selected_section_is_expanded_and_saved() {
    let harness = CourseHarness::new();
    harness
        .preferences
        .set(&expanded_sections_key(42), json!(""))
        .await
        .unwrap();
    let (mut controller, _rx) =
        harness.controller(CourseInputs::new(course(), course_sections()));
    controller.initialize().await.unwrap();

    controller.section_changed(11, None).await.unwrap();

    assert!(controller.expanded_sections().contains(11));
    assert_eq!(
        harness.preferences.value(&expanded_sections_key(42)),
        Some(json!("11"))
    );
}

#[tokio::test]
async fn test_unreadable_store_still_initializes() {
    let harness = CourseHarness::new();
    harness.preferences.set_read_should_fail(true);
    harness.preferences.set_write_should_fail(true);
    let (mut controller, _rx) =
        harness.controller(CourseInputs::new(course(), course_sections()));

    controller.initialize().await.unwrap();
    controller.section_changed(12, None).await.unwrap();

    assert_eq!(controller.selected_section_id(), Some(12));
    assert!(harness.preferences.writes().is_empty());
}
