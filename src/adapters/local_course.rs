//! Offline course service fed from a JSON fixture.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::info;

use crate::error::{CampusResult, ErrorContext, ResultExt};
use crate::models::{Course, Section, ViewedModuleRecord};
use crate::traits::CourseService;

/// Course contents and history as stored in a fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseFixture {
    pub course: Course,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub viewed: Vec<ViewedModuleRecord>,
    #[serde(default)]
    pub has_blocks: bool,
}

impl CourseFixture {
    pub fn from_file(path: impl AsRef<Path>) -> CampusResult<Self> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new(format!("read course fixture {}", path.display()))
                .with_component("local_course")
        };
        let raw = std::fs::read_to_string(path).with_context(context)?;
        serde_json::from_str(&raw).with_context(context)
    }
}

/// Course service that answers from memory and logs views locally.
#[derive(Debug, Default)]
pub struct LocalCourseService {
    viewed: Mutex<Vec<ViewedModuleRecord>>,
    has_blocks: bool,
}

impl LocalCourseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: &CourseFixture) -> Self {
        Self {
            viewed: Mutex::new(fixture.viewed.clone()),
            has_blocks: fixture.has_blocks,
        }
    }

    /// Prepend a view to the history.
    pub fn record_view(&self, record: ViewedModuleRecord) {
        self.viewed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, record);
    }
}

#[async_trait]
impl CourseService for LocalCourseService {
    async fn viewed_modules(&self, course_id: i64) -> CampusResult<Vec<ViewedModuleRecord>> {
        let viewed = self.viewed.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(viewed
            .iter()
            .filter(|record| record.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn log_view(&self, course_id: i64, section_number: Option<i64>) -> CampusResult<()> {
        info!(course_id, ?section_number, "Course viewed");
        Ok(())
    }

    async fn log_my_courses_view(&self) -> CampusResult<()> {
        info!("My courses viewed");
        Ok(())
    }

    async fn has_course_blocks(&self, _course_id: i64) -> CampusResult<bool> {
        Ok(self.has_blocks)
    }

    async fn invalidate_course_blocks(&self, _course_id: i64) -> CampusResult<()> {
        Ok(())
    }
}
