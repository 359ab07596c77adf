//! Course-screen collaborators: format delegate, course service and the
//! visibility rules.

use async_trait::async_trait;

use crate::error::CampusResult;
use crate::models::{Course, ModuleRef, Section, ViewedModuleRecord, STEALTH_MODULES_SECTION_ID};

/// Section proposed by a course format as the one to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSection {
    pub section_id: i64,
    /// Chosen by highlight or override logic rather than viewing history.
    pub force_selected: bool,
}

/// Format-level switches resolved once per course format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatComponents {
    /// Label for the highlighted section ("Current week", "Highlighted").
    pub section_highlighted_name: Option<String>,
    pub display_course_index: bool,
    pub display_blocks: bool,
}

/// Per-format behaviour of the course screen.
#[async_trait]
pub trait CourseFormatDelegate: Send + Sync {
    /// Section to show when nothing more specific applies.
    ///
    /// # Arguments
    /// * `course` - The course being displayed
    /// * `sections` - Display list, possibly starting with the all-sections entry
    ///
    /// # Returns
    /// The proposed section, `None` only when the list is empty
    async fn current_section(&self, course: &Course, sections: &[Section])
        -> Option<CurrentSection>;

    /// Whether the course index button is offered.
    fn display_course_index(&self, course: &Course) -> bool;

    /// Whether the side blocks panel can be opened.
    fn display_blocks(&self, course: &Course) -> bool;

    fn section_highlighted_name(&self, course: &Course) -> Option<String>;

    fn format_components(&self, course: &Course) -> FormatComponents {
        FormatComponents {
            section_highlighted_name: self.section_highlighted_name(course),
            display_course_index: self.display_course_index(course),
            display_blocks: self.display_blocks(course),
        }
    }
}

/// Remote and local course operations the course screen needs.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// View history of the course.
    ///
    /// # Arguments
    /// * `course_id` - Course whose history is read
    ///
    /// # Returns
    /// Records ordered most recent first, or an error when the history
    /// cannot be read
    async fn viewed_modules(&self, course_id: i64) -> CampusResult<Vec<ViewedModuleRecord>>;

    /// Record that the user viewed the course (and section) on the site.
    ///
    /// # Arguments
    /// * `course_id` - The viewed course
    /// * `section_number` - Section number, `None` for the whole course
    async fn log_view(&self, course_id: i64, section_number: Option<i64>) -> CampusResult<()>;

    /// Record that the user viewed the "My courses" page.
    async fn log_my_courses_view(&self) -> CampusResult<()>;

    /// Whether the course has blocks to show in the side panel.
    async fn has_course_blocks(&self, course_id: i64) -> CampusResult<bool>;

    /// Drop cached course blocks so the next check goes to the site.
    async fn invalidate_course_blocks(&self, course_id: i64) -> CampusResult<()>;
}

/// Visibility rules for sections and modules.
///
/// Every method has the standard behaviour as its default, implementors only
/// override what their site changes.
pub trait AccessPolicy: Send + Sync {
    fn can_view_section(&self, section: &Section) -> bool {
        section.user_visible
    }

    fn is_section_stealth(&self, section: &Section) -> bool {
        section.hidden_by_num_sections || section.id == STEALTH_MODULES_SECTION_ID
    }

    /// Available to students but not shown on the course page.
    fn is_module_stealth(&self, module: &ModuleRef, section: Option<&Section>) -> bool {
        !module.visible_on_course_page
            || (module.visible && section.map(|s| !s.visible).unwrap_or(false))
    }

    fn can_view_module(&self, module: &ModuleRef, section: Option<&Section>) -> bool {
        module.user_visible && section.map(|s| self.can_view_section(s)).unwrap_or(true)
    }
}
