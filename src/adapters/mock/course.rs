//! Course-side test doubles.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{CampusError, CampusResult, NetworkError};
use crate::models::{Course, Section, ViewedModuleRecord};
use crate::traits::{CourseFormatDelegate, CourseService, CurrentSection};

/// Course service that records calls and serves configured history.
#[derive(Debug, Clone, Default)]
pub struct MockCourseService {
    viewed: Arc<Mutex<Vec<ViewedModuleRecord>>>,
    has_blocks: Arc<Mutex<bool>>,
    log_should_fail: Arc<Mutex<bool>>,
    view_logs: Arc<Mutex<Vec<(i64, Option<i64>)>>>,
    my_courses_logs: Arc<Mutex<usize>>,
    invalidations: Arc<Mutex<Vec<i64>>>,
}

impl MockCourseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewed(self, records: Vec<ViewedModuleRecord>) -> Self {
        *self.viewed.lock().unwrap() = records;
        self
    }

    pub fn set_viewed(&self, records: Vec<ViewedModuleRecord>) {
        *self.viewed.lock().unwrap() = records;
    }

    pub fn set_has_blocks(&self, has_blocks: bool) {
        *self.has_blocks.lock().unwrap() = has_blocks;
    }

    pub fn set_log_should_fail(&self, should_fail: bool) {
        *self.log_should_fail.lock().unwrap() = should_fail;
    }

    /// `(course_id, section_number)` of every `log_view` call.
    pub fn view_logs(&self) -> Vec<(i64, Option<i64>)> {
        self.view_logs.lock().unwrap().clone()
    }

    pub fn my_courses_log_count(&self) -> usize {
        *self.my_courses_logs.lock().unwrap()
    }

    pub fn block_invalidations(&self) -> Vec<i64> {
        self.invalidations.lock().unwrap().clone()
    }

    fn log_result(&self) -> CampusResult<()> {
        if *self.log_should_fail.lock().unwrap() {
            return Err(CampusError::Network(NetworkError::Timeout {
                operation: "log view".to_string(),
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseService for MockCourseService {
    async fn viewed_modules(&self, course_id: i64) -> CampusResult<Vec<ViewedModuleRecord>> {
        Ok(self
            .viewed
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn log_view(&self, course_id: i64, section_number: Option<i64>) -> CampusResult<()> {
        self.view_logs
            .lock()
            .unwrap()
            .push((course_id, section_number));
        self.log_result()
    }

    async fn log_my_courses_view(&self) -> CampusResult<()> {
        *self.my_courses_logs.lock().unwrap() += 1;
        self.log_result()
    }

    async fn has_course_blocks(&self, _course_id: i64) -> CampusResult<bool> {
        Ok(*self.has_blocks.lock().unwrap())
    }

    async fn invalidate_course_blocks(&self, course_id: i64) -> CampusResult<()> {
        self.invalidations.lock().unwrap().push(course_id);
        Ok(())
    }
}

/// Format delegate returning a fixed current section.
///
/// With no section configured it proposes the first entry of the list.
#[derive(Debug, Clone, Default)]
pub struct FixedFormatDelegate {
    current: Option<CurrentSection>,
    highlighted_name: Option<String>,
    display_course_index: bool,
}

impl FixedFormatDelegate {
    pub fn new() -> Self {
        Self {
            display_course_index: true,
            ..Self::default()
        }
    }

    pub fn with_current(mut self, section_id: i64, force_selected: bool) -> Self {
        self.current = Some(CurrentSection {
            section_id,
            force_selected,
        });
        self
    }

    pub fn with_highlighted_name(mut self, name: impl Into<String>) -> Self {
        self.highlighted_name = Some(name.into());
        self
    }
}

#[async_trait]
impl CourseFormatDelegate for FixedFormatDelegate {
    async fn current_section(
        &self,
        _course: &Course,
        sections: &[Section],
    ) -> Option<CurrentSection> {
        self.current.or_else(|| {
            sections.first().map(|section| CurrentSection {
                section_id: section.id,
                force_selected: false,
            })
        })
    }

    fn display_course_index(&self, _course: &Course) -> bool {
        self.display_course_index
    }

    fn display_blocks(&self, _course: &Course) -> bool {
        true
    }

    fn section_highlighted_name(&self, _course: &Course) -> Option<String> {
        self.highlighted_name.clone()
    }
}
