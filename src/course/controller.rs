//! Course-content screen controller.
//!
//! The host creates the controller with its inputs, calls
//! [`CourseFormatController::initialize`], forwards input changes through
//! [`CourseFormatController::on_inputs_changed`] and finally calls
//! [`CourseFormatController::dispose`]. Everything the view has to do is
//! pushed as a [`ViewCommand`].

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{CampusResult, CourseError};
use crate::events::{AppEvent, CourseModuleViewedEvent, EventBus, SelectCourseTabEvent, Subscription};
use crate::models::{
    has_several_sections, Course, Section, ViewedModuleRecord, ALL_SECTIONS_ID,
};
use crate::traits::{
    AccessPolicy, AnalyticsSink, CourseFormatDelegate, CourseService, CurrentSection,
    FormatComponents, PreferenceStore,
};
use crate::view_state::{CommandSink, NavigationRequest, ViewCommand};

use super::access::can_open_module;
use super::handlers::ModuleHandlerRegistry;
use super::log::course_view_event;
use super::pager::{ActivityPager, LOAD_MORE_ACTIVITIES};
use super::preferences::{CoursePreferences, ExpandedMirror, ExpandedSections};
use super::selection::{
    initial_section, neighbours, section_index, viewed_module_section, SelectionState,
    ViewedModules,
};

/// Collaborators of the course screen.
#[derive(Clone)]
pub struct CourseDeps {
    pub preferences: Arc<dyn PreferenceStore>,
    pub course_service: Arc<dyn CourseService>,
    pub format: Arc<dyn CourseFormatDelegate>,
    pub access: Arc<dyn AccessPolicy>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub handlers: Arc<ModuleHandlerRegistry>,
    pub events: EventBus,
}

/// Inputs the host binds to the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseInputs {
    pub course: Option<Course>,
    pub sections: Vec<Section>,
    pub initial_section_id: Option<i64>,
    pub initial_section_number: Option<i64>,
    pub initial_block_instance_id: Option<i64>,
    /// Module to scroll to on the first selection.
    pub module_id: Option<i64>,
    pub is_guest: bool,
}

impl CourseInputs {
    pub fn new(course: Course, sections: Vec<Section>) -> Self {
        Self {
            course: Some(course),
            sections,
            ..Self::default()
        }
    }
}

/// Result of a pick in the course index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseIndexPick {
    pub section_id: i64,
    pub module_id: Option<i64>,
}

pub struct CourseFormatController {
    deps: CourseDeps,
    commands: CommandSink,
    inputs: CourseInputs,
    /// Display copy of the sections, carrying `expanded`/`highlighted`.
    sections: Vec<Section>,
    state: SelectionState,
    viewed: ViewedModules,
    expanded: ExpandedMirror,
    preferences: Option<CoursePreferences>,
    components: FormatComponents,
    last_format: Option<String>,
    highlighted_id: Option<i64>,
    has_blocks: bool,
    subscription: Option<Subscription>,
    initialized: bool,
    disposed: bool,
}

impl CourseFormatController {
    pub fn new(deps: CourseDeps, commands: CommandSink, inputs: CourseInputs) -> Self {
        Self::with_page_size(deps, commands, inputs, LOAD_MORE_ACTIVITIES)
    }

    /// Create a controller revealing `page_size` activities per pager pass.
    pub fn with_page_size(
        deps: CourseDeps,
        commands: CommandSink,
        inputs: CourseInputs,
        page_size: usize,
    ) -> Self {
        let sections = inputs.sections.clone();
        Self {
            deps,
            commands,
            inputs,
            sections,
            state: SelectionState::with_page_size(page_size),
            viewed: ViewedModules::default(),
            expanded: ExpandedMirror::default(),
            preferences: None,
            components: FormatComponents::default(),
            last_format: None,
            highlighted_id: None,
            has_blocks: false,
            subscription: None,
            initialized: false,
            disposed: false,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// First-time setup. Fails when no course was bound, after asking the
    /// view to show the error and leave the screen.
    pub async fn initialize(&mut self) -> CampusResult<()> {
        if self.disposed {
            return Err(CourseError::Disposed.into());
        }
        if self.initialized {
            return Ok(());
        }

        let Some(course) = self.inputs.course.clone() else {
            let err = CourseError::CourseNotSet;
            warn!("Course screen opened without a course");
            self.commands.emit(ViewCommand::ShowError {
                message: err.user_message(),
            });
            self.commands.emit(ViewCommand::NavigateBack);
            return Err(err.into());
        };

        info!(course_id = course.id, sections = self.sections.len(), "Initializing course screen");
        self.preferences = Some(CoursePreferences::new(
            self.deps.preferences.clone(),
            course.id,
        ));
        self.subscription = Some(self.deps.events.subscribe());
        self.initialized = true;

        self.load_expanded_sections().await;
        self.course_changed().await;
        self.resolve_selection().await
    }

    /// Apply new inputs. Only the parts that differ are reprocessed.
    pub async fn on_inputs_changed(&mut self, next: CourseInputs) -> CampusResult<()> {
        if self.disposed {
            debug!("Ignoring input change on disposed course screen");
            return Ok(());
        }

        let course_changed = next.course != self.inputs.course;
        let sections_changed = next.sections != self.inputs.sections;
        let course_id_changed =
            next.course.as_ref().map(|c| c.id) != self.inputs.course.as_ref().map(|c| c.id);
        self.inputs = next;

        if !self.initialized {
            // Picked up by initialize.
            self.sections = self.inputs.sections.clone();
            return Ok(());
        }

        if course_id_changed {
            if let Some(course_id) = self.course_id() {
                self.switch_course(course_id).await;
                return self.resolve_selection().await;
            }
        }

        // The format resolves against the list it will be shown with.
        if sections_changed {
            self.sections = self.inputs.sections.clone();
            self.expanded.apply(&mut self.sections);
        }
        if course_changed {
            self.course_changed().await;
        }
        if sections_changed {
            self.mark_highlighted();
            self.resolve_selection().await?;
        }
        Ok(())
    }

    /// Drop everything tied to the previous course and load the state
    /// stored for `course_id`.
    async fn switch_course(&mut self, course_id: i64) {
        info!(course_id, sections = self.inputs.sections.len(), "Switching course");
        self.preferences = Some(CoursePreferences::new(
            self.deps.preferences.clone(),
            course_id,
        ));
        self.state = SelectionState::with_page_size(self.state.pager.quota());
        self.viewed = ViewedModules::default();
        self.last_format = None;
        self.highlighted_id = None;
        self.sections = self.inputs.sections.clone();

        self.load_expanded_sections().await;
        self.course_changed().await;
    }

    /// Detach from the event bus. Later calls are ignored.
    pub fn dispose(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.off();
        }
        self.disposed = true;
        debug!("Course screen disposed");
    }

    /// Invalidate the course blocks and recompute whether there are any.
    pub async fn refresh(&mut self) -> CampusResult<()> {
        if self.disposed {
            return Ok(());
        }
        let Some(course_id) = self.course_id() else {
            return Ok(());
        };

        if let Err(err) = self.deps.course_service.invalidate_course_blocks(course_id).await {
            warn!(course_id, error = %err, "Failed to invalidate course blocks");
        }
        self.has_blocks = self.load_has_blocks(course_id).await;
        Ok(())
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a section.
    ///
    /// Expands a real section and recomputes its neighbours; the
    /// all-sections entry restarts the pager instead. The view is logged
    /// only when the selection actually changes.
    ///
    /// # Arguments
    /// * `section_id` - Id of a section in the current list
    /// * `module_id` - Module to scroll into view, if any
    ///
    /// # Returns
    /// `SectionNotFound` for an unknown id, `Disposed` after [`Self::dispose`]
    pub async fn section_changed(
        &mut self,
        section_id: i64,
        module_id: Option<i64>,
    ) -> CampusResult<()> {
        self.ensure_active()?;
        let index = section_index(&self.sections, section_id)
            .ok_or(CourseError::SectionNotFound { section_id })?;

        let previous = self.state.selected.replace(section_id);

        if section_id != ALL_SECTIONS_ID {
            self.expand_section(index).await;
            let (prev, next) = neighbours(&self.sections, index, self.deps.access.as_ref());
            self.state.previous = prev;
            self.state.next = next;
            self.set_all_sections_preferred(false).await;
        } else {
            self.state.previous = None;
            self.state.next = None;
            self.state.pager.reset();
            self.show_more();
            self.set_all_sections_preferred(true).await;
        }

        let scroll_to = match (previous, self.inputs.module_id) {
            (None, Some(input)) => Some(input),
            _ => module_id,
        };
        if let Some(module_id) = scroll_to {
            self.commands.emit(ViewCommand::ScrollToModule { module_id });
        }

        if previous != Some(section_id) {
            if scroll_to.is_none() {
                self.commands.emit(ViewCommand::ScrollToTop);
            }
            let number = self.sections[index].number;
            self.log_view(number, previous.is_none()).await;
        }

        debug!(
            section_id,
            previous = ?self.state.previous,
            next = ?self.state.next,
            "Section changed"
        );
        Ok(())
    }

    /// Reveal more sections while all sections are shown.
    ///
    /// Returns whether further passes can reveal more.
    pub fn show_more_activities(&mut self) -> CampusResult<bool> {
        self.ensure_active()?;
        if self.state.is_all_sections() {
            self.show_more();
        }
        Ok(self.state.pager.can_load_more())
    }

    fn show_more(&mut self) {
        self.state
            .pager
            .show_more(&self.sections, self.deps.access.as_ref());
    }

    async fn resolve_selection(&mut self) -> CampusResult<()> {
        if self.sections.is_empty() {
            if let Some(course_id) = self.course_id() {
                let err = CourseError::NoSections { course_id };
                warn!(error = %err, "Nothing to select");
            }
            return Ok(());
        }
        self.treat_sections().await
    }

    /// Resolve the section to show for the current list.
    async fn treat_sections(&mut self) -> CampusResult<()> {
        self.initialize_viewed_modules().await;

        if let Some(selected) = self.state.selected {
            // The list changed under an existing selection.
            let target = match section_index(&self.sections, selected) {
                Some(_) => Some(selected),
                None => self.current_section().await.map(|c| c.section_id),
            };
            if let Some(section_id) = target {
                self.section_changed(section_id, None).await?;
            }
            return Ok(());
        }

        if !has_several_sections(&self.sections) {
            self.state.loaded = true;
            let first = self.sections[0].id;
            self.section_changed(first, None).await?;
        } else if self.inputs.initial_section_id.is_some()
            || self.inputs.initial_section_number.is_some()
        {
            if let Some(index) = initial_section(
                &self.sections,
                self.inputs.initial_section_id,
                self.inputs.initial_section_number,
                self.deps.access.as_ref(),
            ) {
                self.state.loaded = true;
                let section_id = self.sections[index].id;
                self.section_changed(section_id, None).await?;
            }
        } else if let Some(instance_id) = self.inputs.initial_block_instance_id {
            if self.components.display_blocks && self.has_blocks {
                self.commands.emit(ViewCommand::OpenSideBlocks { instance_id });
            }
        }

        if self.state.loaded {
            return Ok(());
        }

        let all_sections_preferred = match &self.preferences {
            Some(preferences) => preferences.all_sections_preferred().await,
            None => false,
        };
        let Some(current) = self.current_section().await else {
            return Ok(());
        };

        let mut section_id = current.section_id;
        let mut module_id = None;
        if let (false, Some(last)) = (all_sections_preferred, self.viewed.last.as_ref()) {
            if !current.force_selected {
                if let Some(index) = viewed_module_section(&self.sections, last) {
                    section_id = self.sections[index].id;
                    module_id = Some(last.module_id);
                }
            } else if self
                .section(current.section_id)
                .is_some_and(|s| s.contains_module(last.module_id))
            {
                module_id = Some(last.module_id);
            }
        }

        self.state.loaded = true;
        self.section_changed(section_id, module_id).await
    }

    /// The format's current section, falling back to the first entry when
    /// the delegate has no answer inside this list.
    async fn current_section(&self) -> Option<CurrentSection> {
        let course = self.inputs.course.as_ref()?;
        let first = self.sections.first()?;

        match self.deps.format.current_section(course, &self.sections).await {
            Some(current) if self.section(current.section_id).is_some() => Some(current),
            other => {
                debug!(?other, "Format has no current section in list, using first");
                Some(CurrentSection {
                    section_id: first.id,
                    force_selected: false,
                })
            }
        }
    }

    async fn initialize_viewed_modules(&mut self) {
        if self.viewed.initialized {
            return;
        }
        let Some(course_id) = self.course_id() else {
            return;
        };

        let records = match self.deps.course_service.viewed_modules(course_id).await {
            Ok(records) => records,
            Err(err) => {
                warn!(course_id, error = %err, "Failed to read viewed modules");
                Vec::new()
            }
        };

        self.viewed.initialized = true;
        self.viewed.last = records.first().cloned();
        self.viewed
            .viewed
            .extend(records.iter().map(|record| record.module_id));

        if let Some(index) = self
            .viewed
            .last
            .as_ref()
            .and_then(|last| viewed_module_section(&self.sections, last))
        {
            self.expand_section(index).await;
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Handle every event queued since the last call.
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
            AppEvent::SelectCourseTab(event) => self.on_select_course_tab(event).await,
            AppEvent::CourseModuleViewed(event) => self.on_module_viewed(event).await,
            AppEvent::SiteUpdated { .. } | AppEvent::RefreshPage => Ok(()),
        }
    }

    async fn on_select_course_tab(&mut self, event: SelectCourseTabEvent) -> CampusResult<()> {
        if event.name.is_some() {
            return Ok(());
        }

        let target = if let Some(section_id) = event.section_id {
            self.section(section_id).map(|s| s.id)
        } else if let Some(number) = event.section_number {
            self.sections
                .iter()
                .find(|s| s.number == Some(number))
                .map(|s| s.id)
        } else {
            None
        };

        match target {
            Some(section_id) => self.section_changed(section_id, None).await,
            None => Ok(()),
        }
    }

    async fn on_module_viewed(&mut self, event: CourseModuleViewedEvent) -> CampusResult<()> {
        if self.course_id() != Some(event.course_id) {
            return Ok(());
        }

        let record = ViewedModuleRecord {
            module_id: event.module_id,
            section_id: event.section_id,
            course_id: event.course_id,
            time_access: event.time_access,
        };
        if !self.viewed.record(record.clone()) {
            return Ok(());
        }

        let Some(selected) = self.state.selected else {
            return Ok(());
        };
        if selected == ALL_SECTIONS_ID {
            return Ok(());
        }

        match viewed_module_section(&self.sections, &record) {
            Some(index) if self.sections[index].id != selected => {
                let section_id = self.sections[index].id;
                self.section_changed(section_id, Some(record.module_id)).await
            }
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Expand / collapse
    // ========================================================================

    async fn load_expanded_sections(&mut self) {
        let stored = match &self.preferences {
            Some(preferences) => preferences.expanded_sections().await,
            None => None,
        };
        self.expanded = ExpandedMirror::new(stored);
        self.expanded.apply(&mut self.sections);
    }

    async fn expand_section(&mut self, index: usize) {
        self.sections[index].expanded = true;
        if self.expanded.expand(self.sections[index].id) {
            self.save_expanded_sections().await;
        }
    }

    async fn save_expanded_sections(&mut self) {
        let ids = ExpandedSections::from_sections(&self.sections);
        if let Some(preferences) = &self.preferences {
            preferences.save_expanded_sections(&ids).await;
        }
        self.expanded.record_saved(ids);
    }

    /// Replace the expanded set with `section_ids` (the accordion value).
    pub async fn apply_accordion_change(&mut self, section_ids: &[i64]) -> CampusResult<()> {
        self.ensure_active()?;
        for section in self.sections.iter_mut() {
            section.expanded = section_ids.contains(&section.id);
        }
        self.save_expanded_sections().await;
        self.commands.emit(ViewCommand::CheckInfiniteScroll);
        Ok(())
    }

    async fn set_all_sections_preferred(&self, preferred: bool) {
        if let Some(preferences) = &self.preferences {
            preferences.set_all_sections_preferred(preferred).await;
        }
    }

    // ========================================================================
    // Course index and tools
    // ========================================================================

    /// Apply what the user picked in the course index.
    ///
    /// Selects the section; a picked module the user can open is scrolled
    /// to and its handler action is run. Unknown sections are ignored.
    pub async fn apply_course_index_pick(&mut self, pick: CourseIndexPick) -> CampusResult<()> {
        self.ensure_active()?;
        let Some(index) = section_index(&self.sections, pick.section_id) else {
            debug!(section_id = pick.section_id, "Course index pick for unknown section");
            return Ok(());
        };
        self.section_changed(pick.section_id, None).await?;

        let (Some(module_id), Some(course_id)) = (pick.module_id, self.course_id()) else {
            return Ok(());
        };
        let Some(position) = self.sections[index]
            .modules
            .iter()
            .position(|m| m.id == module_id)
        else {
            return Ok(());
        };

        let action = self
            .deps
            .handlers
            .populate(&mut self.sections[index].modules[position], course_id)
            .action
            .clone();

        let section = &self.sections[index];
        if can_open_module(self.deps.access.as_ref(), &section.modules[position], section) {
            self.commands.emit(ViewCommand::ScrollToModule { module_id });
            self.commands
                .emit(ViewCommand::RunModuleAction { module_id, action });
        }

        self.inputs.module_id = Some(module_id);
        Ok(())
    }

    /// Section the tools (index, downloads) should focus.
    ///
    /// With all sections shown this is the section the host reports as
    /// scrolled into view.
    pub fn selected_section_for_tools(&self, scrolled_section: Option<i64>) -> Option<i64> {
        if self.state.is_all_sections() {
            scrolled_section
        } else {
            self.state.selected
        }
    }

    /// Route of the course downloads page.
    ///
    /// # Arguments
    /// * `scrolled_section` - Section the host reports in view, used while
    ///   all sections are shown
    ///
    /// # Returns
    /// `storage/<course id>` with `title`, `section_id` and `is_guest`, or
    /// `CourseNotSet` when no course is bound
    pub fn downloads_route(&self, scrolled_section: Option<i64>) -> CampusResult<NavigationRequest> {
        let course = self.inputs.course.as_ref().ok_or(CourseError::CourseNotSet)?;
        Ok(NavigationRequest::new(format!("storage/{}", course.id))
            .with_param("title", course.fullname.clone())
            .with_param("section_id", self.selected_section_for_tools(scrolled_section))
            .with_param("is_guest", self.inputs.is_guest))
    }

    // ========================================================================
    // Course / format
    // ========================================================================

    async fn course_changed(&mut self) {
        let Some(course) = self.inputs.course.clone() else {
            return;
        };

        if self.last_format.as_deref() != Some(course.format.as_str()) {
            self.last_format = Some(course.format.clone());
            self.components = self.deps.format.format_components(&course);
            self.highlighted_id = self
                .deps
                .format
                .current_section(&course, &self.sections)
                .await
                .map(|current| current.section_id);
            self.mark_highlighted();
            debug!(format = %course.format, components = ?self.components, "Format components resolved");
        }

        self.has_blocks = self.load_has_blocks(course.id).await;
    }

    fn mark_highlighted(&mut self) {
        for section in self.sections.iter_mut() {
            section.highlighted = Some(section.id) == self.highlighted_id;
        }
    }

    async fn load_has_blocks(&self, course_id: i64) -> bool {
        match self.deps.course_service.has_course_blocks(course_id).await {
            Ok(has_blocks) => has_blocks,
            Err(err) => {
                warn!(course_id, error = %err, "Failed to check course blocks");
                false
            }
        }
    }

    async fn log_view(&self, section_number: Option<i64>, first_load: bool) {
        let Some(course) = &self.inputs.course else {
            return;
        };
        if let Err(err) = self
            .deps
            .course_service
            .log_view(course.id, section_number)
            .await
        {
            debug!(course_id = course.id, error = %err, "Ignoring course view log failure");
        }
        self.deps
            .analytics
            .log_event(course_view_event(course, section_number, first_load));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    fn ensure_active(&self) -> CampusResult<()> {
        if self.disposed {
            Err(CourseError::Disposed.into())
        } else {
            Ok(())
        }
    }

    fn section(&self, section_id: i64) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// The bound course, `None` until the host provides one.
    pub fn course(&self) -> Option<&Course> {
        self.inputs.course.as_ref()
    }

    pub fn course_id(&self) -> Option<i64> {
        self.inputs.course.as_ref().map(|c| c.id)
    }

    /// Display list with `expanded` and `highlighted` applied.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.state.selected.and_then(|id| self.section(id))
    }

    /// Id of the shown section. [`ALL_SECTIONS_ID`] while every section is shown.
    pub fn selected_section_id(&self) -> Option<i64> {
        self.state.selected
    }

    /// Closest navigable section before the selected one.
    ///
    /// # Returns
    /// `None` at the start of the list and while all sections are shown
    pub fn previous_section_id(&self) -> Option<i64> {
        self.state.previous
    }

    pub fn next_section_id(&self) -> Option<i64> {
        self.state.next
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    pub fn pager(&self) -> &ActivityPager {
        &self.state.pager
    }

    /// Whether the all-sections view has more sections to reveal.
    pub fn can_load_more(&self) -> bool {
        self.state.is_all_sections() && self.state.pager.can_load_more()
    }

    /// Initial section resolution has completed.
    pub fn is_loaded(&self) -> bool {
        self.state.loaded
    }

    pub fn has_blocks(&self) -> bool {
        self.has_blocks
    }

    pub fn components(&self) -> &FormatComponents {
        &self.components
    }

    /// Module the screen was opened on, or the last one picked in the index.
    pub fn module_id(&self) -> Option<i64> {
        self.inputs.module_id
    }

    pub fn is_module_viewed(&self, module_id: i64) -> bool {
        self.viewed.is_viewed(module_id)
    }

    /// Most recent entry of the course's view history.
    pub fn last_viewed_module(&self) -> Option<&ViewedModuleRecord> {
        self.viewed.last.as_ref()
    }

    /// Expanded section ids as last loaded or saved.
    pub fn expanded_sections(&self) -> &ExpandedSections {
        self.expanded.ids()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for CourseFormatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseFormatController")
            .field("course_id", &self.course_id())
            .field("sections", &self.sections.len())
            .field("state", &self.state)
            .field("disposed", &self.disposed)
            .finish()
    }
}
