//! Course and dashboard screen error types.

use std::fmt;

/// Errors raised by the course-content controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseError {
    /// `initialize` was called without a course input.
    CourseNotSet,

    /// A section id was passed that is not in the current list.
    SectionNotFound { section_id: i64 },

    /// The course has no sections to display.
    NoSections { course_id: i64 },

    /// The controller was used after `dispose`.
    Disposed,
}

impl CourseError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CourseError::CourseNotSet => "Course not set".to_string(),
            CourseError::SectionNotFound { .. } => {
                "The requested section could not be found.".to_string()
            }
            CourseError::NoSections { .. } => "This course has no content yet.".to_string(),
            CourseError::Disposed => "This screen has been closed.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CourseError::CourseNotSet => "E_COURSE_NOT_SET",
            CourseError::SectionNotFound { .. } => "E_COURSE_SECTION",
            CourseError::NoSections { .. } => "E_COURSE_EMPTY",
            CourseError::Disposed => "E_COURSE_DISPOSED",
        }
    }
}

impl fmt::Display for CourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseError::CourseNotSet => write!(f, "Course not set"),
            CourseError::SectionNotFound { section_id } => {
                write!(f, "Section {} not found", section_id)
            }
            CourseError::NoSections { course_id } => {
                write!(f, "Course {} has no sections", course_id)
            }
            CourseError::Disposed => write!(f, "Controller already disposed"),
        }
    }
}

impl std::error::Error for CourseError {}

/// Errors raised while loading the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// The site does not offer the dashboard web service.
    NotAvailable,

    /// The "My courses" page is disabled on the site.
    MyCoursesDisabled,

    /// The payload did not contain the expected structure.
    MalformedPayload { message: String },
}

impl DashboardError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::NotAvailable => {
                "The dashboard is not available on this site.".to_string()
            }
            DashboardError::MyCoursesDisabled => "My courses is disabled on this site.".to_string(),
            DashboardError::MalformedPayload { .. } => {
                "The dashboard could not be read. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::NotAvailable => "E_DASH_UNAVAILABLE",
            DashboardError::MyCoursesDisabled => "E_DASH_DISABLED",
            DashboardError::MalformedPayload { .. } => "E_DASH_PAYLOAD",
        }
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::NotAvailable => write!(f, "Dashboard not available"),
            DashboardError::MyCoursesDisabled => write!(f, "My courses disabled"),
            DashboardError::MalformedPayload { message } => {
                write!(f, "Malformed dashboard payload: {}", message)
            }
        }
    }
}

impl std::error::Error for DashboardError {}
