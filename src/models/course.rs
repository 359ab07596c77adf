//! Course, section and module data models.
//!
//! These mirror the course contents payload of the site web services, plus
//! two display-only flags (`expanded`, `highlighted`) that the course
//! controller owns.

use serde::{Deserialize, Serialize};

use super::deserialize_id;
use super::module_handler::ModuleHandlerData;

/// Id of the synthetic "all sections" pseudo-section.
pub const ALL_SECTIONS_ID: i64 = -2;

/// Id of the section that gathers stealth modules.
pub const STEALTH_MODULES_SECTION_ID: i64 = -1;

fn default_true() -> bool {
    true
}

/// A course as seen by the course-content screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub fullname: String,
    /// Course format name (`topics`, `weeks`, `singleactivity`, ...).
    #[serde(default)]
    pub format: String,
    /// Section number highlighted by the course editor, if any.
    #[serde(default)]
    pub marker: Option<i64>,
    /// `coursedisplay` format option. `0` shows all sections on one page.
    #[serde(default)]
    pub course_display: Option<i64>,
}

impl Course {
    pub fn new(id: i64, fullname: impl Into<String>) -> Self {
        Self {
            id,
            fullname: fullname.into(),
            format: "topics".to_string(),
            marker: None,
            course_display: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_marker(mut self, marker: i64) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_course_display(mut self, value: i64) -> Self {
        self.course_display = Some(value);
        self
    }
}

/// Completion state of a module for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Completion tracking disabled for the module.
    #[default]
    None,
    Incomplete,
    Complete,
    CompletePass,
    CompleteFail,
}

impl CompletionStatus {
    /// Map the numeric state used by the web services.
    pub fn from_state(state: i64) -> Self {
        match state {
            0 => CompletionStatus::Incomplete,
            1 => CompletionStatus::Complete,
            2 => CompletionStatus::CompletePass,
            3 => CompletionStatus::CompleteFail,
            _ => CompletionStatus::None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            CompletionStatus::Complete | CompletionStatus::CompletePass
        )
    }
}

/// A module (activity or resource) inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub section_id: i64,
    #[serde(default)]
    pub course_id: i64,
    #[serde(default)]
    pub name: String,
    /// Module type name (`forum`, `page`, `quiz`, ...).
    #[serde(default)]
    pub modname: String,
    #[serde(default)]
    pub completion: CompletionStatus,
    #[serde(default = "default_true")]
    pub user_visible: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub visible_on_course_page: bool,
    /// Populated on first interaction through the handler registry.
    #[serde(skip)]
    pub handler: Option<ModuleHandlerData>,
}

impl ModuleRef {
    pub fn new(id: i64, section_id: i64, modname: impl Into<String>) -> Self {
        let modname = modname.into();
        Self {
            id,
            section_id,
            course_id: 0,
            name: format!("{} {}", modname, id),
            modname,
            completion: CompletionStatus::None,
            user_visible: true,
            visible: true,
            visible_on_course_page: true,
            handler: None,
        }
    }

    /// Mark the module as available but hidden from the course page.
    pub fn stealth(mut self) -> Self {
        self.visible_on_course_page = false;
        self
    }
}

/// A course section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    /// Ordinal number; absent for the all-sections pseudo-section.
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleRef>,
    #[serde(default = "default_true")]
    pub has_content: bool,
    #[serde(default = "default_true")]
    pub user_visible: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Section is beyond the configured number of sections.
    #[serde(default)]
    pub hidden_by_num_sections: bool,
    #[serde(skip)]
    pub expanded: bool,
    #[serde(skip)]
    pub highlighted: bool,
}

impl Section {
    pub fn new(id: i64, number: i64) -> Self {
        Self {
            id,
            number: Some(number),
            name: format!("Section {}", number),
            modules: Vec::new(),
            has_content: true,
            user_visible: true,
            visible: true,
            hidden_by_num_sections: false,
            expanded: false,
            highlighted: false,
        }
    }

    /// The synthetic "all sections" entry placed first in the list.
    pub fn all_sections(name: impl Into<String>) -> Self {
        Self {
            id: ALL_SECTIONS_ID,
            number: None,
            name: name.into(),
            modules: Vec::new(),
            has_content: false,
            user_visible: true,
            visible: true,
            hidden_by_num_sections: false,
            expanded: false,
            highlighted: false,
        }
    }

    pub fn with_modules(mut self, modules: Vec<ModuleRef>) -> Self {
        self.modules = modules;
        self
    }

    pub fn is_all_sections(&self) -> bool {
        self.id == ALL_SECTIONS_ID
    }

    pub fn is_stealth_modules_section(&self) -> bool {
        self.id == STEALTH_MODULES_SECTION_ID
    }

    pub fn contains_module(&self, module_id: i64) -> bool {
        self.modules.iter().any(|module| module.id == module_id)
    }

    pub fn module(&self, module_id: i64) -> Option<&ModuleRef> {
        self.modules.iter().find(|module| module.id == module_id)
    }
}

/// A row of the per-course view history, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewedModuleRecord {
    pub module_id: i64,
    #[serde(default)]
    pub section_id: Option<i64>,
    pub course_id: i64,
    /// Milliseconds since the epoch.
    pub time_access: i64,
}

/// Number of real sections in a list (the pseudo-section excluded).
pub fn real_section_count(sections: &[Section]) -> usize {
    sections.iter().filter(|s| !s.is_all_sections()).count()
}

/// Whether the list offers a choice between at least two real sections.
pub fn has_several_sections(sections: &[Section]) -> bool {
    real_section_count(sections) > 1
}
