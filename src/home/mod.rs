//! Home screen: dashboard loading, overview layout and tabs.
//!
//! ## Components
//!
//! - [`HomeController`]: lifecycle, refresh, events and navigation
//! - [`DashboardLoader`]: generation-stamped load state
//! - [`LayoutToggle`]: persisted card/list layout
//! - [`merge_tabs`]: tabs from handler registrations

pub mod controller;
pub mod layout;
pub mod loader;
pub mod tabs;

pub use controller::{HomeController, HomeDeps, ReadySignal, MY_COURSES_VIEW_WS};
pub use layout::{LayoutToggle, OverviewLayout, LAYOUT_PREFERENCE_KEY};
pub use loader::{fetch_outcome, resolve_overview, DashboardLoader, LoadOutcome, OverviewSource};
pub use tabs::{merge_tabs, HOME_PAGE_PREFIX};
