//! Concrete implementations of the collaborator traits.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`HttpDashboardSource`] - dashboard blocks from the site web services
//! - [`FilePreferenceStore`] - per-site JSON preference file
//! - [`LocalCourseService`] - course history served from a fixture
//! - [`StandardFormatDelegate`], [`StaticBlockRegistry`], [`StaticSite`],
//!   [`TracingAnalytics`]
//!
//! The [`mock`] submodule provides test doubles for all of them.

pub mod analytics;
pub mod blocks;
pub mod file_preferences;
pub mod format;
pub mod http_dashboard;
pub mod local_course;
pub mod mock;
pub mod reqwest_http;
pub mod site;

pub use analytics::TracingAnalytics;
pub use blocks::StaticBlockRegistry;
pub use file_preferences::FilePreferenceStore;
pub use format::StandardFormatDelegate;
pub use http_dashboard::HttpDashboardSource;
pub use local_course::{CourseFixture, LocalCourseService};
pub use mock::{InMemoryPreferences, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use site::StaticSite;
