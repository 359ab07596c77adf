//! Course view analytics.

use crate::models::{AnalyticsEvent, Course};

pub const COURSE_VIEW_WS: &str = "core_course_view_course";

/// Analytics event for a course (and section) view.
///
/// On the first load the section is left out of the URL unless the course
/// shows all its sections on one page (`coursedisplay == 0`).
pub fn course_view_event(
    course: &Course,
    section_number: Option<i64>,
    first_load: bool,
) -> AnalyticsEvent {
    let mut extra = section_number
        .map(|n| format!("&section={}", n))
        .unwrap_or_default();
    if first_load && section_number.is_some() && course.course_display != Some(0) {
        extra.clear();
    }

    AnalyticsEvent::view_item(
        COURSE_VIEW_WS,
        course.fullname.clone(),
        format!("/course/view.php?id={}{}", course.id, extra),
    )
    .with_data("id", course.id)
    .with_data("sectionnumber", section_number)
    .with_data("category", "course")
}
