//! `campus dashboard` and `campus toggle-layout`.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;

use crate::adapters::{
    HttpDashboardSource, LocalCourseService, ReqwestHttpClient, StaticBlockRegistry, StaticSite,
    TracingAnalytics,
};
use crate::config::CampusConfig;
use crate::events::EventBus;
use crate::home::{HomeController, HomeDeps, LayoutToggle};
use crate::view_state::CommandSink;

use super::preference_store;

pub async fn handle_dashboard_command(config: &CampusConfig) -> Result<()> {
    let (site_url, token) = match (&config.site_url, &config.token) {
        (Some(url), Some(token)) => (url.clone(), token.clone()),
        _ => return Err(eyre!("CAMPUS_SITE_URL and CAMPUS_TOKEN must be set")),
    };

    let site_id = StaticSite::id_from_url(&site_url);
    let client = Arc::new(ReqwestHttpClient::new());
    let source = HttpDashboardSource::new(client, site_url, token, config.site_version);

    let deps = HomeDeps {
        site: Arc::new(StaticSite::new(site_id.clone(), 0, site_id)),
        dashboard: Arc::new(source),
        blocks: Arc::new(StaticBlockRegistry::default()),
        preferences: Arc::new(preference_store(config)?),
        course_service: Arc::new(LocalCourseService::new()),
        analytics: Arc::new(TracingAnalytics),
        events: EventBus::new(),
    };
    let (commands, mut receiver) = CommandSink::channel();
    let mut home = HomeController::new(deps, commands);
    home.initialize().await?;

    match home.loaded_block() {
        Some(block) => println!(
            "overview: {} (instance {:?}, source {:?})",
            block.name,
            block.instance_id,
            home.loader().outcome().map(|o| o.source)
        ),
        None => println!("overview: none"),
    }
    println!("side blocks: {}", home.has_side_blocks());
    println!("layout: {}", home.layout());
    while let Ok(command) = receiver.try_recv() {
        println!("view: {:?}", command);
    }

    home.dispose();
    Ok(())
}

pub async fn handle_toggle_layout_command(config: &CampusConfig) -> Result<()> {
    let store = Arc::new(preference_store(config)?);
    let mut toggle = LayoutToggle::load(store).await;
    let layout = toggle.toggle().await?;
    println!("layout: {}", layout);
    Ok(())
}
