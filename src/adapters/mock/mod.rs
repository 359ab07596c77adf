//! Mock implementations for testing.
//!
//! Test doubles for every collaborator trait, usable without network or
//! file system access. Clones share their recorded state.

pub mod course;
pub mod dashboard;
pub mod http;
pub mod preferences;
pub mod site;

pub use course::{FixedFormatDelegate, MockCourseService};
pub use dashboard::{MockDashboardSource, MockOverviewBlock};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use preferences::InMemoryPreferences;
pub use site::{MockSite, RecordingAnalytics};
