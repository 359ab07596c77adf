//! Current site session.

use async_trait::async_trait;

/// The site the user is logged into.
#[async_trait]
pub trait SiteSession: Send + Sync {
    fn site_id(&self) -> String;

    fn user_id(&self) -> i64;

    /// Display name, with filters applied by the implementation.
    async fn site_name(&self) -> String;

    fn is_download_courses_disabled(&self) -> bool;
}
