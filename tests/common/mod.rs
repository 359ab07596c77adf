//! Common test utilities for integration tests.
//!
//! Builds controllers wired to the mock collaborators and keeps handles on
//! the mocks so tests can inspect what the controllers did.

#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use campus::adapters::mock::{
    FixedFormatDelegate, InMemoryPreferences, MockCourseService, MockDashboardSource, MockSite,
    RecordingAnalytics,
};
use campus::adapters::StaticBlockRegistry;
use campus::course::{
    CourseDeps, CourseFormatController, CourseInputs, ModuleHandlerRegistry, StandardAccessPolicy,
};
use campus::events::EventBus;
use campus::home::{HomeController, HomeDeps};
use campus::models::{Course, ModuleRef, Section, ViewedModuleRecord};
use campus::view_state::{CommandSink, ViewCommand};

pub const SITE_ID: &str = "test-site";

/// A section with `modules` page modules numbered from `id * 100`.
pub fn section(id: i64, number: i64, modules: usize) -> Section {
    Section::new(id, number).with_modules(
        (0..modules)
            .map(|n| ModuleRef::new(id * 100 + n as i64, id, "page"))
            .collect(),
    )
}

/// `[All, S10(#1), S11(#2), S12(#3)]`, each real section with two modules.
pub fn course_sections() -> Vec<Section> {
    vec![
        Section::all_sections("All sections"),
        section(10, 1, 2),
        section(11, 2, 2),
        section(12, 3, 2),
    ]
}

pub fn course() -> Course {
    Course::new(42, "Biology 101")
}

pub fn viewed(module_id: i64, section_id: Option<i64>, time_access: i64) -> ViewedModuleRecord {
    ViewedModuleRecord {
        module_id,
        section_id,
        course_id: 42,
        time_access,
    }
}

/// Mocks behind a course controller.
pub struct CourseHarness {
    pub preferences: InMemoryPreferences,
    pub service: MockCourseService,
    pub analytics: RecordingAnalytics,
    pub events: EventBus,
    pub format: FixedFormatDelegate,
}

impl CourseHarness {
    pub fn new() -> Self {
        Self {
            preferences: InMemoryPreferences::new(),
            service: MockCourseService::new(),
            analytics: RecordingAnalytics::new(),
            events: EventBus::new(),
            format: FixedFormatDelegate::new(),
        }
    }

    pub fn with_format(mut self, format: FixedFormatDelegate) -> Self {
        self.format = format;
        self
    }

    pub fn deps(&self) -> CourseDeps {
        CourseDeps {
            preferences: Arc::new(self.preferences.clone()),
            course_service: Arc::new(self.service.clone()),
            format: Arc::new(self.format.clone()),
            access: Arc::new(StandardAccessPolicy),
            analytics: Arc::new(self.analytics.clone()),
            handlers: Arc::new(ModuleHandlerRegistry::with_standard_handlers()),
            events: self.events.clone(),
        }
    }

    pub fn controller(
        &self,
        inputs: CourseInputs,
    ) -> (CourseFormatController, UnboundedReceiver<ViewCommand>) {
        let (commands, receiver) = CommandSink::channel();
        (
            CourseFormatController::new(self.deps(), commands, inputs),
            receiver,
        )
    }
}

/// Mocks behind a home controller.
pub struct HomeHarness {
    pub site: MockSite,
    pub dashboard: MockDashboardSource,
    pub preferences: InMemoryPreferences,
    pub service: MockCourseService,
    pub analytics: RecordingAnalytics,
    pub events: EventBus,
}

impl HomeHarness {
    pub fn new() -> Self {
        Self {
            site: MockSite::new(SITE_ID),
            dashboard: MockDashboardSource::new(),
            preferences: InMemoryPreferences::new(),
            service: MockCourseService::new(),
            analytics: RecordingAnalytics::new(),
            events: EventBus::new(),
        }
    }

    pub fn deps(&self) -> HomeDeps {
        HomeDeps {
            site: Arc::new(self.site.clone()),
            dashboard: Arc::new(self.dashboard.clone()),
            blocks: Arc::new(StaticBlockRegistry::default()),
            preferences: Arc::new(self.preferences.clone()),
            course_service: Arc::new(self.service.clone()),
            analytics: Arc::new(self.analytics.clone()),
            events: self.events.clone(),
        }
    }

    pub fn controller(&self) -> (HomeController, UnboundedReceiver<ViewCommand>) {
        let (commands, receiver) = CommandSink::channel();
        (HomeController::new(self.deps(), commands), receiver)
    }
}

/// Every command queued so far.
pub fn drain(receiver: &mut UnboundedReceiver<ViewCommand>) -> Vec<ViewCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = receiver.try_recv() {
        commands.push(command);
    }
    commands
}
