//! Dashboard data models.
//!
//! The dashboard is a list of blocks split into a main region and a side
//! region. The home screen only cares about one of them, the course
//! overview block.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the course overview block.
pub const OVERVIEW_BLOCK_NAME: &str = "myoverview";

/// Dashboard page key for the "My courses" page.
pub const MY_PAGE_COURSES: &str = "__courses";

/// Region name the site uses for side blocks.
pub const SIDE_REGION: &str = "side-pre";

// ============================================================================
// Blocks
// ============================================================================

/// A block descriptor as returned by the dashboard web service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBlock {
    #[serde(default, rename = "instanceid")]
    pub instance_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub contents: Option<serde_json::Value>,
}

fn default_visible() -> bool {
    true
}

impl DashboardBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            instance_id: None,
            name: name.into(),
            region: None,
            visible: true,
            contents: None,
        }
    }

    /// Minimal overview descriptor used when the dashboard cannot be loaded.
    pub fn fallback_overview() -> Self {
        Self::new(OVERVIEW_BLOCK_NAME)
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn is_side_block(&self) -> bool {
        self.region.as_deref() == Some(SIDE_REGION)
    }
}

/// Dashboard payload split by region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardBlocks {
    pub main_blocks: Vec<DashboardBlock>,
    pub side_blocks: Vec<DashboardBlock>,
}

impl DashboardBlocks {
    /// Split a flat block list by region.
    pub fn from_blocks(blocks: Vec<DashboardBlock>) -> Self {
        let (side_blocks, main_blocks): (Vec<_>, Vec<_>) =
            blocks.into_iter().partition(|b| b.is_side_block());
        Self {
            main_blocks,
            side_blocks,
        }
    }

    /// First block with the given name, main region first.
    pub fn find(&self, name: &str) -> Option<&DashboardBlock> {
        self.main_blocks
            .iter()
            .chain(self.side_blocks.iter())
            .find(|block| block.name == name)
    }

    pub fn overview(&self) -> Option<&DashboardBlock> {
        self.find(OVERVIEW_BLOCK_NAME)
    }
}

// ============================================================================
// Fetch options
// ============================================================================

/// How a data source may use its cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingStrategy {
    /// Serve cached data when present.
    #[default]
    PreferCache,
    /// Hit the network, fall back to cached data on failure.
    PreferNetwork,
    /// Always hit the network.
    OnlyNetwork,
}

/// Options for a dashboard fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Page key sent to sites that support it.
    pub my_page: Option<String>,
    pub reading_strategy: ReadingStrategy,
}

impl DashboardOptions {
    /// Cache key for these options.
    pub fn cache_key(&self) -> &str {
        self.my_page.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Site version
// ============================================================================

/// Release version of the connected site, compared on major.minor.patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SiteVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SiteVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_at_least(&self, major: u32, minor: u32) -> bool {
        *self >= SiteVersion::new(major, minor, 0)
    }

    /// Sites from 4.0 accept the dashboard page parameter.
    pub fn supports_my_page(&self) -> bool {
        self.is_at_least(4, 0)
    }
}

impl FromStr for SiteVersion {
    type Err = String;

    /// Parses release strings such as `4.1.2+ (Build: 20230313)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let release = s
            .split_whitespace()
            .next()
            .ok_or_else(|| format!("empty release string: {:?}", s))?;
        let mut parts = release
            .trim_end_matches('+')
            .split('.')
            .map(|part| part.parse::<u32>());

        let major = match parts.next() {
            Some(Ok(major)) => major,
            _ => return Err(format!("invalid release string: {:?}", s)),
        };
        let minor = parts.next().and_then(Result::ok).unwrap_or(0);
        let patch = parts.next().and_then(Result::ok).unwrap_or(0);

        Ok(SiteVersion::new(major, minor, patch))
    }
}

impl fmt::Display for SiteVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
