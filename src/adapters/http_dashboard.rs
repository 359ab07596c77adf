//! Dashboard source backed by the site's REST web services.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::error::{CampusResult, ErrorContext, NetworkError, ResultExt};
use crate::models::{DashboardBlock, DashboardBlocks, DashboardOptions, ReadingStrategy, SiteVersion};
use crate::traits::{DashboardSource, Headers, HttpClient};

pub const DASHBOARD_WS_FUNCTION: &str = "core_block_get_dashboard_blocks";

const REST_PATH: &str = "/webservice/rest/server.php";

#[derive(Debug, Deserialize)]
struct DashboardPayload {
    #[serde(default)]
    blocks: Vec<DashboardBlock>,
}

#[derive(Debug, Deserialize)]
struct WsException {
    #[serde(default)]
    errorcode: String,
    #[serde(default)]
    message: String,
}

/// Fetches dashboard blocks over HTTP and keeps the last payload per page.
pub struct HttpDashboardSource {
    client: Arc<dyn HttpClient>,
    site_url: String,
    token: String,
    version: SiteVersion,
    available: bool,
    my_courses_disabled: bool,
    cache: Mutex<HashMap<String, DashboardBlocks>>,
}

impl HttpDashboardSource {
    pub fn new(
        client: Arc<dyn HttpClient>,
        site_url: impl Into<String>,
        token: impl Into<String>,
        version: SiteVersion,
    ) -> Self {
        Self {
            client,
            site_url: site_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            version,
            available: true,
            my_courses_disabled: false,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Site features as reported by the site info call.
    pub fn with_features(mut self, available: bool, my_courses_disabled: bool) -> Self {
        self.available = available;
        self.my_courses_disabled = my_courses_disabled;
        self
    }

    /// REST URL for the dashboard call.
    pub fn request_url(&self, options: &DashboardOptions) -> String {
        let mut url = format!(
            "{}{}?wstoken={}&wsfunction={}&moodlewsrestformat=json",
            self.site_url,
            REST_PATH,
            urlencoding::encode(&self.token),
            DASHBOARD_WS_FUNCTION
        );
        if let Some(page) = &options.my_page {
            url.push_str("&mypage=");
            url.push_str(&urlencoding::encode(page));
        }
        url
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, DashboardBlocks>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, options: &DashboardOptions) -> Option<DashboardBlocks> {
        self.cache().get(options.cache_key()).cloned()
    }

    async fn fetch(&self, options: &DashboardOptions) -> CampusResult<DashboardBlocks> {
        self.fetch_blocks(options).await.with_context(|| {
            ErrorContext::new(DASHBOARD_WS_FUNCTION)
                .with_page(options.cache_key())
                .with_component("http_dashboard")
        })
    }

    async fn fetch_blocks(&self, options: &DashboardOptions) -> CampusResult<DashboardBlocks> {
        let url = self.request_url(options);
        debug!(my_page = ?options.my_page, "Fetching dashboard blocks");

        let response = self.client.get(&url, &Headers::new()).await?;
        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }
            .into());
        }

        let value: serde_json::Value = response.json()?;
        if value.get("exception").is_some() {
            let exception: WsException = serde_json::from_value(value)?;
            return Err(NetworkError::WebService {
                error_code: exception.errorcode,
                message: exception.message,
            }
            .into());
        }

        let payload: DashboardPayload = serde_json::from_value(value)?;
        let blocks = DashboardBlocks::from_blocks(payload.blocks);
        self.cache()
            .insert(options.cache_key().to_string(), blocks.clone());
        Ok(blocks)
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn is_my_courses_disabled(&self) -> bool {
        self.my_courses_disabled
    }

    fn site_version(&self) -> SiteVersion {
        self.version
    }

    async fn get_dashboard_blocks(
        &self,
        options: &DashboardOptions,
    ) -> CampusResult<DashboardBlocks> {
        match options.reading_strategy {
            ReadingStrategy::PreferCache => match self.cached(options) {
                Some(blocks) => Ok(blocks),
                None => self.fetch(options).await,
            },
            ReadingStrategy::PreferNetwork => match self.fetch(options).await {
                Ok(blocks) => Ok(blocks),
                Err(err) => match self.cached(options) {
                    Some(blocks) => {
                        warn!(error = %err, "Dashboard fetch failed, serving cached blocks");
                        Ok(blocks)
                    }
                    None => Err(err),
                },
            },
            ReadingStrategy::OnlyNetwork => self.fetch(options).await,
        }
    }

    async fn invalidate_dashboard_blocks(&self, my_page: Option<&str>) -> CampusResult<()> {
        self.cache().remove(my_page.unwrap_or(""));
        Ok(())
    }
}

impl std::fmt::Debug for HttpDashboardSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDashboardSource")
            .field("site_url", &self.site_url)
            .field("version", &self.version)
            .finish()
    }
}
