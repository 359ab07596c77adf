//! Section and module visibility.

use crate::models::{ModuleRef, Section};
use crate::traits::AccessPolicy;

/// The site's standard visibility rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAccessPolicy;

impl AccessPolicy for StandardAccessPolicy {}

/// Whether a section can be navigated to (arrows, initial target).
pub fn can_navigate_to(policy: &dyn AccessPolicy, section: &Section) -> bool {
    policy.can_view_section(section) && !policy.is_section_stealth(section)
}

/// Number of modules of a section shown on the course page.
pub fn visible_module_count(policy: &dyn AccessPolicy, section: &Section) -> usize {
    section
        .modules
        .iter()
        .filter(|module| !policy.is_module_stealth(module, Some(section)))
        .count()
}

/// Whether the user can open a module found in `section`.
pub fn can_open_module(policy: &dyn AccessPolicy, module: &ModuleRef, section: &Section) -> bool {
    policy.can_view_module(module, Some(section))
}
