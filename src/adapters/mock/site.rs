//! Site session and analytics test doubles.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::AnalyticsEvent;
use crate::traits::{AnalyticsSink, SiteSession};

/// Site session whose values can change between calls.
#[derive(Debug, Clone)]
pub struct MockSite {
    site_id: String,
    user_id: i64,
    name: Arc<Mutex<String>>,
    download_courses_disabled: Arc<Mutex<bool>>,
}

impl MockSite {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            user_id: 2,
            name: Arc::new(Mutex::new("Test site".to_string())),
            download_courses_disabled: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.lock().unwrap() = name.into();
    }

    pub fn set_download_courses_disabled(&self, disabled: bool) {
        *self.download_courses_disabled.lock().unwrap() = disabled;
    }
}

#[async_trait]
impl SiteSession for MockSite {
    fn site_id(&self) -> String {
        self.site_id.clone()
    }

    fn user_id(&self) -> i64 {
        self.user_id
    }

    async fn site_name(&self) -> String {
        self.name.lock().unwrap().clone()
    }

    fn is_download_courses_disabled(&self) -> bool {
        *self.download_courses_disabled.lock().unwrap()
    }
}

/// Analytics sink that keeps every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn log_event(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}
