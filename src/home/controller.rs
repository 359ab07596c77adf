//! Home screen controller.

use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::CampusResult;
use crate::events::{AppEvent, EventBus, Subscription};
use crate::models::{AnalyticsEvent, DashboardBlock, HomeHandler, HomeTab, MY_PAGE_COURSES};
use crate::traits::{
    AnalyticsSink, BlockRegistry, CourseService, DashboardSource, OverviewBlock, PreferenceStore,
    SiteSession,
};
use crate::view_state::{CommandSink, LoadTicket, NavigationRequest, ViewCommand};

use super::layout::{LayoutToggle, OverviewLayout};
use super::loader::{fetch_outcome, DashboardLoader, LoadOutcome};
use super::tabs::merge_tabs;

pub const MY_COURSES_VIEW_WS: &str = "core_my_view_page";

/// Collaborators of the home screen.
#[derive(Clone)]
pub struct HomeDeps {
    pub site: Arc<dyn SiteSession>,
    pub dashboard: Arc<dyn DashboardSource>,
    pub blocks: Arc<dyn BlockRegistry>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub course_service: Arc<dyn CourseService>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub events: EventBus,
}

/// Resolves once the first dashboard load completed.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    receiver: watch::Receiver<bool>,
}

impl ReadySignal {
    pub fn is_ready(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait until ready. Returns immediately if the controller is gone.
    pub async fn wait(mut self) {
        let _ = self.receiver.wait_for(|ready| *ready).await;
    }
}

pub struct HomeController {
    deps: HomeDeps,
    commands: CommandSink,
    loader: DashboardLoader,
    layout: Option<LayoutToggle>,
    site_name: String,
    user_id: i64,
    download_courses_enabled: bool,
    search_enabled: bool,
    tabs: Vec<HomeTab>,
    tabs_loaded: bool,
    overview: Option<Arc<dyn OverviewBlock>>,
    view_logged: bool,
    ready: watch::Sender<bool>,
    subscription: Option<Subscription>,
    disposed: bool,
}

impl HomeController {
    pub fn new(deps: HomeDeps, commands: CommandSink) -> Self {
        let (ready, _) = watch::channel(false);
        let user_id = deps.site.user_id();
        Self {
            deps,
            commands,
            loader: DashboardLoader::new(),
            layout: None,
            site_name: String::new(),
            user_id,
            download_courses_enabled: false,
            search_enabled: false,
            tabs: Vec::new(),
            tabs_loaded: false,
            overview: None,
            view_logged: false,
            ready,
            subscription: None,
            disposed: false,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Subscribe to app events, build the tabs and start the first load.
    ///
    /// # Returns
    /// `Ok(())` once the first load has completed, immediately when disposed
    pub async fn initialize(&mut self) -> CampusResult<()> {
        if self.disposed {
            return Ok(());
        }
        info!(site_id = %self.deps.site.site_id(), "Initializing home screen");

        self.subscription = Some(self.deps.events.subscribe());
        self.user_id = self.deps.site.user_id();
        self.download_courses_enabled = !self.deps.site.is_download_courses_disabled();
        self.load_site_name().await;

        self.load_content().await?;
        self.search_enabled = true;
        self.layout = Some(LayoutToggle::load(self.deps.preferences.clone()).await);
        Ok(())
    }

    /// Detach from the event bus and drop in-flight loads.
    pub fn dispose(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.off();
        }
        self.loader.cancel();
        self.disposed = true;
        debug!("Home screen disposed");
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Start a dashboard load without holding the controller.
    ///
    /// The returned future owns its collaborators; feed its output to
    /// [`HomeController::finish_load`] together with the ticket.
    pub fn start_load(&mut self) -> (LoadTicket, BoxFuture<'static, LoadOutcome>) {
        let source = self.deps.dashboard.clone();
        let registry = self.deps.blocks.clone();
        let strategy = self.loader.reading_strategy();
        let ticket = self.loader.begin();

        let fetch = async move { fetch_outcome(source.as_ref(), registry.as_ref(), strategy).await };
        (ticket, fetch.boxed())
    }

    /// Apply a finished load. Returns false when it was stale or the
    /// controller is disposed.
    pub async fn finish_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if self.disposed {
            debug!("Ignoring dashboard load after dispose");
            return false;
        }
        let notice = outcome.notice.clone();
        if !self.loader.complete(ticket, outcome) {
            return false;
        }

        if let Some(message) = notice {
            self.commands.emit(ViewCommand::ShowError { message });
        }
        self.ready.send_replace(true);
        self.log_view_once().await;
        true
    }

    pub async fn load_content(&mut self) -> CampusResult<()> {
        if self.disposed {
            return Ok(());
        }
        let (ticket, fetch) = self.start_load();
        let outcome = fetch.await;
        self.finish_load(ticket, outcome).await;
        Ok(())
    }

    /// Invalidate the cached dashboard and the overview block, then reload.
    pub async fn refresh(&mut self) -> CampusResult<()> {
        if self.disposed {
            return Ok(());
        }

        let mut invalidations: Vec<BoxFuture<'_, CampusResult<()>>> = vec![self
            .deps
            .dashboard
            .invalidate_dashboard_blocks(Some(MY_PAGE_COURSES))];
        if let Some(overview) = &self.overview {
            invalidations.push(overview.invalidate_content());
        }

        for result in join_all(invalidations).await {
            if let Err(err) = result {
                debug!(error = %err, "Ignoring invalidation failure");
            }
        }

        self.load_content().await
    }

    /// Attach the rendered overview block so refreshes reach its cache.
    pub fn attach_overview_block(&mut self, block: Arc<dyn OverviewBlock>) {
        self.overview = Some(block);
    }

    // ========================================================================
    // Tabs, events, navigation
    // ========================================================================

    /// Rebuild the tabs from the current handler list.
    pub fn on_handlers(&mut self, handlers: &[HomeHandler], handlers_loaded: bool) {
        self.tabs = merge_tabs(&self.tabs, handlers);
        self.tabs_loaded = handlers_loaded;
        debug!(tabs = self.tabs.len(), handlers_loaded, "Home tabs updated");
    }

    pub async fn process_events(&mut self) -> CampusResult<usize> {
        if self.disposed {
            return Ok(0);
        }
        let events = match self.subscription.as_mut() {
            Some(subscription) => subscription.drain(),
            None => return Ok(0),
        };

        let count = events.len();
        for event in events {
            self.handle_event(event).await?;
        }
        Ok(count)
    }

    pub async fn handle_event(&mut self, event: AppEvent) -> CampusResult<()> {
        if self.disposed {
            return Ok(());
        }
        match event {
            AppEvent::SiteUpdated { site_id } if site_id == self.deps.site.site_id() => {
                self.download_courses_enabled = !self.deps.site.is_download_courses_disabled();
                self.load_site_name().await;
                Ok(())
            }
            AppEvent::RefreshPage => {
                self.loader.mark_loading();
                self.load_content().await
            }
            _ => Ok(()),
        }
    }

    pub fn open_search(&self) {
        self.commands.emit(ViewCommand::Navigate(
            NavigationRequest::new("/courses/list").with_param("mode", "search"),
        ));
    }

    pub fn open_notifications(&self) {
        self.commands
            .emit(ViewCommand::Navigate(NavigationRequest::new("/notifications/list")));
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub async fn toggle_layout(&mut self) -> CampusResult<OverviewLayout> {
        self.layout_toggle().await.toggle().await
    }

    /// Switch the overview layout and store it.
    ///
    /// # Arguments
    /// * `layout` - The layout to show
    pub async fn set_layout(&mut self, layout: OverviewLayout) -> CampusResult<()> {
        self.layout_toggle().await.set(layout).await
    }

    async fn layout_toggle(&mut self) -> &mut LayoutToggle {
        let toggle = match self.layout.take() {
            Some(toggle) => toggle,
            None => LayoutToggle::load(self.deps.preferences.clone()).await,
        };
        self.layout.insert(toggle)
    }

    pub fn layout(&self) -> OverviewLayout {
        self.layout
            .as_ref()
            .map(LayoutToggle::layout)
            .unwrap_or_default()
    }

    // ========================================================================
    // Internals and accessors
    // ========================================================================

    async fn load_site_name(&mut self) {
        self.site_name = self.deps.site.site_name().await;
    }

    async fn log_view_once(&mut self) {
        if self.view_logged {
            return;
        }
        self.view_logged = true;

        if let Err(err) = self.deps.course_service.log_my_courses_view().await {
            debug!(error = %err, "Ignoring my courses view log failure");
        }
        self.deps.analytics.log_event(
            AnalyticsEvent::view_item(MY_COURSES_VIEW_WS, "My courses", "/my/courses.php")
                .with_data("category", "course")
                .with_data("page", "my"),
        );
    }

    /// Signal resolved by the first completed load.
    pub fn ready(&self) -> ReadySignal {
        ReadySignal {
            receiver: self.ready.subscribe(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_loaded()
    }

    pub fn loaded_block(&self) -> Option<&DashboardBlock> {
        self.loader.block()
    }

    pub fn has_side_blocks(&self) -> bool {
        self.loader.has_side_blocks()
    }

    pub fn loader(&self) -> &DashboardLoader {
        &self.loader
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn download_courses_enabled(&self) -> bool {
        self.download_courses_enabled
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn tabs(&self) -> &[HomeTab] {
        &self.tabs
    }

    pub fn tabs_loaded(&self) -> bool {
        self.tabs_loaded
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for HomeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeController")
            .field("loader", &self.loader)
            .field("site_name", &self.site_name)
            .field("tabs", &self.tabs.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
