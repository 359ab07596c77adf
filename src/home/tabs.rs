//! Home screen tabs built from handler registrations.

use std::collections::HashMap;

use crate::models::{HomeHandler, HomeTab};

/// Route prefix of pages shown as home tabs.
pub const HOME_PAGE_PREFIX: &str = "/main/home";

/// Merge a handler list into tabs.
///
/// Tabs that already exist (same title) are kept as they are. The result
/// is ordered by handler priority, highest first; equal priorities keep
/// the handler order.
pub fn merge_tabs(existing: &[HomeTab], handlers: &[HomeHandler]) -> Vec<HomeTab> {
    let priorities: HashMap<&str, i32> = handlers
        .iter()
        .map(|h| (h.title.as_str(), h.priority))
        .collect();

    let mut tabs: Vec<HomeTab> = handlers
        .iter()
        .map(|handler| {
            existing
                .iter()
                .find(|tab| tab.title == handler.title)
                .cloned()
                .unwrap_or_else(|| tab_for(handler))
        })
        .collect();

    tabs.sort_by_key(|tab| {
        std::cmp::Reverse(priorities.get(tab.title.as_str()).copied().unwrap_or(0))
    });
    tabs
}

fn tab_for(handler: &HomeHandler) -> HomeTab {
    HomeTab {
        page: format!("{}/{}", HOME_PAGE_PREFIX, handler.page),
        page_params: handler.page_params.clone(),
        title: handler.title.clone(),
        class: handler.class.clone(),
        icon: handler.icon.clone(),
        badge: handler.badge.clone(),
    }
}
