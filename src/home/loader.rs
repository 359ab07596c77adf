//! Dashboard loading for the home screen.
//!
//! A load is split in three steps so several loads may be in flight:
//! [`DashboardLoader::begin`] hands out a ticket, [`fetch_outcome`] talks to
//! the collaborators without touching the loader, and
//! [`DashboardLoader::complete`] applies the outcome only if its ticket is
//! still the latest one.

use tracing::{debug, info, warn};

use crate::models::{
    DashboardBlock, DashboardBlocks, DashboardOptions, ReadingStrategy, MY_PAGE_COURSES,
};
use crate::traits::{BlockRegistry, DashboardSource};
use crate::view_state::{GenerationCounter, LoadTicket};

/// Where the overview block of a load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewSource {
    /// Found in the dashboard payload.
    Dashboard,
    /// Synthesized descriptor.
    Fallback,
    /// The site disabled "My courses"; nothing to show.
    Disabled,
    /// The payload had no overview block and the site can page it.
    Missing,
}

/// Result of one dashboard load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub block: Option<DashboardBlock>,
    pub has_side_blocks: bool,
    pub source: OverviewSource,
    /// Message for the user when the fetch failed.
    pub notice: Option<String>,
}

impl LoadOutcome {
    fn fallback(notice: Option<String>) -> Self {
        Self {
            block: Some(DashboardBlock::fallback_overview()),
            has_side_blocks: false,
            source: OverviewSource::Fallback,
            notice,
        }
    }
}

/// Pick the overview block of a payload.
///
/// Returns the block (if any) and whether side blocks should be offered.
pub fn resolve_overview(
    blocks: &DashboardBlocks,
    supports_my_page: bool,
    registry: &dyn BlockRegistry,
) -> (Option<DashboardBlock>, bool) {
    let has_side_blocks = supports_my_page && registry.has_supported_block(&blocks.side_blocks);
    (blocks.overview().cloned(), has_side_blocks)
}

/// Fetch the dashboard and decide what the home screen shows.
pub async fn fetch_outcome(
    source: &dyn DashboardSource,
    registry: &dyn BlockRegistry,
    reading_strategy: ReadingStrategy,
) -> LoadOutcome {
    let available = source.is_available().await;
    let disabled = source.is_my_courses_disabled().await;
    let supports_my_page = source.site_version().supports_my_page();

    if !available {
        debug!("Dashboard not available, using fallback overview");
        return LoadOutcome::fallback(None);
    }
    if disabled {
        debug!("My courses disabled on site");
        return LoadOutcome {
            block: None,
            has_side_blocks: false,
            source: OverviewSource::Disabled,
            notice: None,
        };
    }

    let options = DashboardOptions {
        my_page: supports_my_page.then(|| MY_PAGE_COURSES.to_string()),
        reading_strategy,
    };

    match source.get_dashboard_blocks(&options).await {
        Ok(blocks) => {
            let (block, has_side_blocks) = resolve_overview(&blocks, supports_my_page, registry);
            match block {
                Some(block) => LoadOutcome {
                    block: Some(block),
                    has_side_blocks,
                    source: OverviewSource::Dashboard,
                    notice: None,
                },
                None if !supports_my_page => LoadOutcome::fallback(None),
                None => LoadOutcome {
                    block: None,
                    has_side_blocks,
                    source: OverviewSource::Missing,
                    notice: None,
                },
            }
        }
        Err(err) => {
            warn!(
                error = %err,
                code = err.error_code(),
                category = %err.category(),
                "Failed to load dashboard blocks"
            );
            LoadOutcome::fallback(Some(err.user_message()))
        }
    }
}

/// State of the home screen's dashboard, stamped by load generation.
#[derive(Debug, Default)]
pub struct DashboardLoader {
    generations: GenerationCounter,
    outcome: Option<LoadOutcome>,
    loaded: bool,
    completed: usize,
}

impl DashboardLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. Earlier tickets become stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.generations.begin()
    }

    /// Cached data is fine for the first load; later loads go to the network.
    pub fn reading_strategy(&self) -> ReadingStrategy {
        if self.completed == 0 {
            ReadingStrategy::PreferCache
        } else {
            ReadingStrategy::PreferNetwork
        }
    }

    /// Apply an outcome. Returns false (and changes nothing) when stale.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if !self.generations.is_current(ticket) {
            debug!(generation = ticket.generation(), "Discarding stale dashboard load");
            return false;
        }
        info!(source = ?outcome.source, "Dashboard loaded");
        self.outcome = Some(outcome);
        self.loaded = true;
        self.completed += 1;
        true
    }

    /// Show the loading state again until the next completion.
    pub fn mark_loading(&mut self) {
        self.loaded = false;
    }

    /// Drop every outstanding load.
    pub fn cancel(&mut self) {
        self.generations.invalidate();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn block(&self) -> Option<&DashboardBlock> {
        self.outcome.as_ref().and_then(|o| o.block.as_ref())
    }

    pub fn has_side_blocks(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.has_side_blocks)
    }

    pub fn outcome(&self) -> Option<&LoadOutcome> {
        self.outcome.as_ref()
    }

    pub fn completed_loads(&self) -> usize {
        self.completed
    }
}
