//! Block registry backed by a fixed list of block names.

use std::collections::HashSet;

use crate::traits::BlockRegistry;

/// Block types the client renders out of the box.
pub const DEFAULT_SUPPORTED_BLOCKS: &[&str] = &[
    "myoverview",
    "timeline",
    "recentlyaccessedcourses",
    "recentlyaccesseditems",
    "starredcourses",
    "calendar_month",
    "calendar_upcoming",
    "badges",
    "comments",
];

#[derive(Debug, Clone)]
pub struct StaticBlockRegistry {
    supported: HashSet<String>,
}

impl StaticBlockRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticBlockRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORTED_BLOCKS.iter().copied())
    }
}

impl BlockRegistry for StaticBlockRegistry {
    fn is_block_supported(&self, name: &str) -> bool {
        self.supported.contains(name)
    }
}
