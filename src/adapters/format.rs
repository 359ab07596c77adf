//! Format delegate for the standard topic- and week-based course formats.

use async_trait::async_trait;

use crate::models::{Course, Section};
use crate::traits::{CourseFormatDelegate, CurrentSection};

/// Formats that show a single activity and no section list.
const SINGLE_ACTIVITY_FORMAT: &str = "singleactivity";

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatDelegate;

impl StandardFormatDelegate {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CourseFormatDelegate for StandardFormatDelegate {
    /// The marked section wins and is forced; otherwise the first real
    /// section with content, then the first entry.
    async fn current_section(
        &self,
        course: &Course,
        sections: &[Section],
    ) -> Option<CurrentSection> {
        if let Some(marker) = course.marker.filter(|marker| *marker > 0) {
            if let Some(section) = sections.iter().find(|s| s.number == Some(marker)) {
                return Some(CurrentSection {
                    section_id: section.id,
                    force_selected: true,
                });
            }
        }

        sections
            .iter()
            .find(|s| !s.is_all_sections() && s.has_content)
            .or_else(|| sections.first())
            .map(|section| CurrentSection {
                section_id: section.id,
                force_selected: false,
            })
    }

    fn display_course_index(&self, course: &Course) -> bool {
        course.format != SINGLE_ACTIVITY_FORMAT
    }

    fn display_blocks(&self, course: &Course) -> bool {
        course.format != SINGLE_ACTIVITY_FORMAT
    }

    fn section_highlighted_name(&self, course: &Course) -> Option<String> {
        match course.format.as_str() {
            "weeks" => Some("Current week".to_string()),
            "topics" => Some("Highlighted".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section::all_sections("All sections"),
            Section::new(10, 0),
            Section::new(11, 1),
            Section::new(12, 2),
        ]
    }

    #[tokio::test]
    async fn test_marker_is_forced() {
        let course = Course::new(1, "Biology").with_marker(2);
        let current = StandardFormatDelegate
            .current_section(&course, &sections())
            .await
            .unwrap();
        assert_eq!(current.section_id, 12);
        assert!(current.force_selected);
    }

    #[tokio::test]
    async fn test_first_real_section_without_marker() {
        let course = Course::new(1, "Biology");
        let current = StandardFormatDelegate
            .current_section(&course, &sections())
            .await
            .unwrap();
        assert_eq!(current.section_id, 10);
        assert!(!current.force_selected);

        let empty = StandardFormatDelegate.current_section(&course, &[]).await;
        assert!(empty.is_none());
    }

    #[test]
    fn test_components_by_format() {
        let weeks = Course::new(1, "History").with_format("weeks");
        let components = StandardFormatDelegate.format_components(&weeks);
        assert_eq!(
            components.section_highlighted_name.as_deref(),
            Some("Current week")
        );
        assert!(components.display_course_index);

        let single = Course::new(2, "Quiz").with_format(SINGLE_ACTIVITY_FORMAT);
        assert!(!StandardFormatDelegate.display_course_index(&single));
        assert_eq!(StandardFormatDelegate.section_highlighted_name(&single), None);
    }
}
