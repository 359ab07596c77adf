//! Site session with fixed values, used by the binary.

use async_trait::async_trait;

use crate::traits::SiteSession;

#[derive(Debug, Clone)]
pub struct StaticSite {
    site_id: String,
    user_id: i64,
    name: String,
    download_courses_disabled: bool,
}

impl StaticSite {
    pub fn new(site_id: impl Into<String>, user_id: i64, name: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            user_id,
            name: name.into(),
            download_courses_disabled: false,
        }
    }

    pub fn with_download_courses_disabled(mut self, disabled: bool) -> Self {
        self.download_courses_disabled = disabled;
        self
    }

    /// Site id derived from a site URL (`https://school.example/lms` → `school.example_lms`).
    pub fn id_from_url(url: &str) -> String {
        let stripped = url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        stripped.replace('/', "_")
    }
}

#[async_trait]
impl SiteSession for StaticSite {
    fn site_id(&self) -> String {
        self.site_id.clone()
    }

    fn user_id(&self) -> i64 {
        self.user_id
    }

    async fn site_name(&self) -> String {
        self.name.clone()
    }

    fn is_download_courses_disabled(&self) -> bool {
        self.download_courses_disabled
    }
}
