//! Home-screen collaborators: dashboard source, block registry and the
//! attached overview block.

use async_trait::async_trait;

use crate::error::CampusResult;
use crate::models::{DashboardBlock, DashboardBlocks, DashboardOptions, SiteVersion};

/// Source of the block-based dashboard payload.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Whether the site exposes the dashboard web service at all.
    async fn is_available(&self) -> bool;

    /// Whether the site disabled the "My courses" page.
    async fn is_my_courses_disabled(&self) -> bool;

    fn site_version(&self) -> SiteVersion;

    async fn get_dashboard_blocks(&self, options: &DashboardOptions)
        -> CampusResult<DashboardBlocks>;

    /// Drop the cached payload for a page key (`None` = the default dashboard).
    async fn invalidate_dashboard_blocks(&self, my_page: Option<&str>) -> CampusResult<()>;
}

/// Registry of the block types this client can render.
pub trait BlockRegistry: Send + Sync {
    fn is_block_supported(&self, name: &str) -> bool;

    fn has_supported_block(&self, blocks: &[DashboardBlock]) -> bool {
        blocks.iter().any(|block| self.is_block_supported(&block.name))
    }
}

/// Rendered overview block attached by the host.
#[async_trait]
pub trait OverviewBlock: Send + Sync {
    /// Drop the block's own cached data.
    async fn invalidate_content(&self) -> CampusResult<()>;
}
