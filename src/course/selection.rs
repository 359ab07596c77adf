//! Selection state and the lookups the section selector is built from.

use std::collections::HashSet;

use crate::models::{Section, ViewedModuleRecord, ALL_SECTIONS_ID};
use crate::traits::AccessPolicy;

use super::access::can_navigate_to;
use super::pager::ActivityPager;

/// Which section is shown and what surrounds it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<i64>,
    pub previous: Option<i64>,
    pub next: Option<i64>,
    pub pager: ActivityPager,
    /// Initial resolution done.
    pub loaded: bool,
}

impl SelectionState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: ActivityPager::new(page_size),
            ..Self::default()
        }
    }

    pub fn is_all_sections(&self) -> bool {
        self.selected == Some(ALL_SECTIONS_ID)
    }
}

/// View history of the current course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewedModules {
    pub initialized: bool,
    pub viewed: HashSet<i64>,
    pub last: Option<ViewedModuleRecord>,
}

impl ViewedModules {
    /// Record a view. Returns true when it is the most recent one so far.
    pub fn record(&mut self, record: ViewedModuleRecord) -> bool {
        self.viewed.insert(record.module_id);
        let newer = self
            .last
            .as_ref()
            .map_or(true, |last| record.time_access > last.time_access);
        if newer {
            self.last = Some(record);
        }
        newer
    }

    pub fn is_viewed(&self, module_id: i64) -> bool {
        self.viewed.contains(&module_id)
    }
}

pub fn section_index(sections: &[Section], section_id: i64) -> Option<usize> {
    sections.iter().position(|s| s.id == section_id)
}

/// Index of the section holding a viewed module.
///
/// The record's section id is tried first, then the modules are scanned.
/// The stealth-modules section is never returned.
pub fn viewed_module_section(sections: &[Section], record: &ViewedModuleRecord) -> Option<usize> {
    record
        .section_id
        .and_then(|id| section_index(sections, id))
        .or_else(|| {
            sections
                .iter()
                .position(|s| s.contains_module(record.module_id))
        })
        .filter(|&index| !sections[index].is_stealth_modules_section())
}

/// Section matching an explicit id or number hint, if the user may open it.
pub fn initial_section(
    sections: &[Section],
    section_id: Option<i64>,
    section_number: Option<i64>,
    policy: &dyn AccessPolicy,
) -> Option<usize> {
    sections
        .iter()
        .position(|s| {
            section_id == Some(s.id) || (s.number.is_some() && s.number == section_number)
        })
        .filter(|&index| can_navigate_to(policy, &sections[index]))
}

/// First navigable sections before and after `index`.
///
/// The all-sections entry is never a neighbour.
pub fn neighbours(
    sections: &[Section],
    index: usize,
    policy: &dyn AccessPolicy,
) -> (Option<i64>, Option<i64>) {
    let navigable = |s: &&Section| !s.is_all_sections() && can_navigate_to(policy, s);

    let previous = sections[..index].iter().rev().find(navigable).map(|s| s.id);
    let next = sections
        .get(index + 1..)
        .and_then(|rest| rest.iter().find(navigable))
        .map(|s| s.id);
    (previous, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::access::StandardAccessPolicy;
    use crate::models::{ModuleRef, STEALTH_MODULES_SECTION_ID};

    fn record(module_id: i64, section_id: Option<i64>, time_access: i64) -> ViewedModuleRecord {
        ViewedModuleRecord {
            module_id,
            section_id,
            course_id: 1,
            time_access,
        }
    }

    fn course_sections() -> Vec<Section> {
        let mut hidden = Section::new(12, 2);
        hidden.user_visible = false;
        vec![
            Section::all_sections("All"),
            Section::new(10, 0).with_modules(vec![ModuleRef::new(100, 10, "page")]),
            Section::new(11, 1).with_modules(vec![ModuleRef::new(110, 11, "quiz")]),
            hidden,
            Section::new(13, 3),
            Section::new(STEALTH_MODULES_SECTION_ID, 4)
                .with_modules(vec![ModuleRef::new(900, STEALTH_MODULES_SECTION_ID, "page")]),
        ]
    }

    #[test]
    fn test_neighbours_skip_hidden_and_pseudo_section() {
        let sections = course_sections();
        let policy = StandardAccessPolicy;

        assert_eq!(neighbours(&sections, 1, &policy), (None, Some(11)));
        assert_eq!(neighbours(&sections, 2, &policy), (Some(10), Some(13)));
        // Hidden 12 skipped, stealth section never next.
        assert_eq!(neighbours(&sections, 4, &policy), (Some(11), None));
    }

    #[test]
    fn test_viewed_module_section_prefers_section_id() {
        let sections = course_sections();
        assert_eq!(viewed_module_section(&sections, &record(110, Some(10), 1)), Some(1));
        assert_eq!(viewed_module_section(&sections, &record(110, None, 1)), Some(2));
        assert_eq!(viewed_module_section(&sections, &record(110, Some(77), 1)), Some(2));
        assert_eq!(viewed_module_section(&sections, &record(555, None, 1)), None);
    }

    #[test]
    fn test_viewed_module_section_never_stealth() {
        let sections = course_sections();
        assert_eq!(
            viewed_module_section(&sections, &record(900, Some(STEALTH_MODULES_SECTION_ID), 1)),
            None
        );
        assert_eq!(viewed_module_section(&sections, &record(900, None, 1)), None);
    }

    #[test]
    fn test_initial_section_by_id_or_number() {
        let sections = course_sections();
        let policy = StandardAccessPolicy;

        assert_eq!(initial_section(&sections, Some(11), None, &policy), Some(2));
        assert_eq!(initial_section(&sections, None, Some(3), &policy), Some(4));
        // Not viewable.
        assert_eq!(initial_section(&sections, Some(12), None, &policy), None);
        assert_eq!(initial_section(&sections, None, None, &policy), None);
    }

    #[test]
    fn test_viewed_modules_tracks_latest() {
        let mut viewed = ViewedModules::default();
        assert!(viewed.record(record(1, None, 100)));
        assert!(!viewed.record(record(2, None, 50)));
        assert!(viewed.record(record(3, None, 200)));

        assert!(viewed.is_viewed(2));
        assert_eq!(viewed.last.as_ref().map(|r| r.module_id), Some(3));
    }
}
