//! Dashboard-side test doubles.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{CampusError, CampusResult, NetworkError};
use crate::models::{DashboardBlocks, DashboardOptions, SiteVersion};
use crate::traits::{DashboardSource, OverviewBlock};

#[derive(Debug, Default)]
struct DashboardState {
    available: bool,
    my_courses_disabled: bool,
    version: SiteVersion,
    blocks: DashboardBlocks,
    fail: bool,
    requests: Vec<DashboardOptions>,
    invalidations: Vec<Option<String>>,
}

/// Dashboard source with configurable payload and recorded calls.
#[derive(Debug, Clone)]
pub struct MockDashboardSource {
    state: Arc<Mutex<DashboardState>>,
}

impl MockDashboardSource {
    /// Available source on a 4.1 site with an empty payload.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState {
                available: true,
                version: SiteVersion::new(4, 1, 0),
                ..DashboardState::default()
            })),
        }
    }

    pub fn with_blocks(self, blocks: DashboardBlocks) -> Self {
        self.set_blocks(blocks);
        self
    }

    pub fn with_version(self, version: SiteVersion) -> Self {
        self.state.lock().unwrap().version = version;
        self
    }

    pub fn set_blocks(&self, blocks: DashboardBlocks) {
        self.state.lock().unwrap().blocks = blocks;
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().available = available;
    }

    pub fn set_my_courses_disabled(&self, disabled: bool) {
        self.state.lock().unwrap().my_courses_disabled = disabled;
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    /// Options of every `get_dashboard_blocks` call.
    pub fn requests(&self) -> Vec<DashboardOptions> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn invalidations(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().invalidations.clone()
    }
}

impl Default for MockDashboardSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardSource for MockDashboardSource {
    async fn is_available(&self) -> bool {
        self.state.lock().unwrap().available
    }

    async fn is_my_courses_disabled(&self) -> bool {
        self.state.lock().unwrap().my_courses_disabled
    }

    fn site_version(&self) -> SiteVersion {
        self.state.lock().unwrap().version
    }

    async fn get_dashboard_blocks(
        &self,
        options: &DashboardOptions,
    ) -> CampusResult<DashboardBlocks> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(options.clone());
        if state.fail {
            return Err(CampusError::Network(NetworkError::ConnectionFailed {
                url: "mock://dashboard".to_string(),
                message: "Simulated failure".to_string(),
            }));
        }
        Ok(state.blocks.clone())
    }

    async fn invalidate_dashboard_blocks(&self, my_page: Option<&str>) -> CampusResult<()> {
        self.state
            .lock()
            .unwrap()
            .invalidations
            .push(my_page.map(str::to_string));
        Ok(())
    }
}

/// Overview block counting invalidations.
#[derive(Debug, Clone, Default)]
pub struct MockOverviewBlock {
    invalidations: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockOverviewBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn invalidation_count(&self) -> usize {
        *self.invalidations.lock().unwrap()
    }
}

#[async_trait]
impl OverviewBlock for MockOverviewBlock {
    async fn invalidate_content(&self) -> CampusResult<()> {
        *self.invalidations.lock().unwrap() += 1;
        if self.fail {
            return Err(CampusError::Network(NetworkError::Cancelled));
        }
        Ok(())
    }
}
