//! Incremental reveal of sections while "all sections" is shown.
//!
//! The pager keeps a cursor on the last revealed section. Each pass moves
//! it forward until a quota of visible activities has been counted, so a
//! long course is rendered a few sections at a time.

use crate::models::Section;
use crate::traits::AccessPolicy;

use super::access::visible_module_count;

/// Activities revealed per pass by default.
pub const LOAD_MORE_ACTIVITIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPager {
    /// Index of the last revealed section; `None` before the first pass.
    cursor: Option<usize>,
    quota: usize,
    can_load_more: bool,
    last_pass_count: usize,
}

impl Default for ActivityPager {
    fn default() -> Self {
        Self::new(LOAD_MORE_ACTIVITIES)
    }
}

impl ActivityPager {
    pub fn new(quota: usize) -> Self {
        Self {
            cursor: None,
            quota: quota.max(1),
            can_load_more: false,
            last_pass_count: 0,
        }
    }

    /// Forget everything revealed so far.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.can_load_more = false;
        self.last_pass_count = 0;
    }

    /// Run one pass over `sections`.
    ///
    /// Sections without content, without modules or collapsed are passed
    /// over without counting. A section is always counted whole, so one
    /// pass may go past the quota.
    ///
    /// # Arguments
    /// * `sections` - The display list, all-sections entry included
    /// * `policy` - Decides which modules are stealth and not counted
    ///
    /// # Returns
    /// The number of activities counted in this pass
    pub fn show_more(&mut self, sections: &[Section], policy: &dyn AccessPolicy) -> usize {
        let mut loaded = 0;

        while self.has_remaining(sections.len()) && loaded < self.quota {
            let index = self.cursor.map_or(0, |c| c + 1);
            self.cursor = Some(index);

            let section = &sections[index];
            if !section.has_content || section.modules.is_empty() || !section.expanded {
                continue;
            }

            loaded += visible_module_count(policy, section);
        }

        self.can_load_more = self.has_remaining(sections.len());
        self.last_pass_count = loaded;
        tracing::debug!(
            cursor = ?self.cursor,
            loaded,
            can_load_more = self.can_load_more,
            "Activity pager pass"
        );
        loaded
    }

    fn has_remaining(&self, len: usize) -> bool {
        match self.cursor {
            None => len > 0,
            Some(cursor) => cursor + 1 < len,
        }
    }

    /// Index of the last revealed section.
    ///
    /// # Returns
    /// `None` until a pass has moved past the start of the list
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Activities a pass aims to reveal (at least one).
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Whether sections after the cursor remain, as of the last pass.
    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    /// Activities counted by the most recent pass.
    pub fn last_pass_count(&self) -> usize {
        self.last_pass_count
    }

    /// Whether the section at `index` has been revealed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.cursor.is_some_and(|cursor| index <= cursor)
    }
}
