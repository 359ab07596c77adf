//! Trait abstractions for dependency injection and testability.
//!
//! Every capability the controllers consume is a trait here, so hosts plug in
//! their own session, storage and network layers and tests plug in mocks.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`PreferenceStore`] - Per-site key-value preferences
//! - [`CourseFormatDelegate`] - Format-specific section logic
//! - [`CourseService`] - View history, view logging and course blocks
//! - [`AccessPolicy`] - Section/module visibility rules
//! - [`DashboardSource`] - Dashboard block payload
//! - [`BlockRegistry`] - Supported block types
//! - [`OverviewBlock`] - Attached overview block
//! - [`SiteSession`] - Current site
//! - [`AnalyticsSink`] - Analytics events

pub mod analytics;
pub mod course;
pub mod dashboard;
pub mod http;
pub mod preferences;
pub mod site;

pub use analytics::AnalyticsSink;
pub use course::{AccessPolicy, CourseFormatDelegate, CourseService, CurrentSection, FormatComponents};
pub use dashboard::{BlockRegistry, DashboardSource, OverviewBlock};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use preferences::PreferenceStore;
pub use site::SiteSession;
