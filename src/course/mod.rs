//! Course-content screen: section selection, activity paging and the
//! per-course preferences behind them.
//!
//! ## Components
//!
//! - [`CourseFormatController`]: lifecycle, selection and event handling
//! - [`ActivityPager`]: incremental reveal in "all sections" mode
//! - [`CoursePreferences`] / [`ExpandedSections`]: persisted choices
//! - [`ModuleHandlerRegistry`]: lazily resolved module handler data
//! - [`StandardAccessPolicy`]: default visibility rules

pub mod access;
pub mod controller;
pub mod handlers;
pub mod log;
pub mod pager;
pub mod preferences;
pub mod selection;

pub use access::StandardAccessPolicy;
pub use controller::{CourseDeps, CourseFormatController, CourseIndexPick, CourseInputs};
pub use handlers::{ModuleHandler, ModuleHandlerRegistry, StandardModuleHandler};
pub use log::course_view_event;
pub use pager::{ActivityPager, LOAD_MORE_ACTIVITIES};
pub use preferences::{CoursePreferences, ExpandedMirror, ExpandedSections};
pub use selection::{SelectionState, ViewedModules};
