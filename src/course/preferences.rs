//! Per-course preferences: "all sections preferred" and expanded sections.
//!
//! Both live in the site preference store under a fixed prefix plus the
//! course id. Reads fall back to defaults and writes are logged and dropped
//! on failure, so a broken store never blocks the course screen.

use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::models::{Section, ALL_SECTIONS_ID};
use crate::traits::PreferenceStore;

pub const ALL_SECTIONS_PREFERRED_PREFIX: &str = "CoreCourseAllSectionsPreferred-";
pub const EXPANDED_SECTIONS_PREFIX: &str = "CoreCourseExpandedSections-";

pub fn all_sections_preferred_key(course_id: i64) -> String {
    format!("{}{}", ALL_SECTIONS_PREFERRED_PREFIX, course_id)
}

pub fn expanded_sections_key(course_id: i64) -> String {
    format!("{}{}", EXPANDED_SECTIONS_PREFIX, course_id)
}

// ============================================================================
// ExpandedSections
// ============================================================================

/// Ordered, duplicate-free set of expanded section ids.
///
/// The all-sections pseudo-section is never a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSections {
    ids: Vec<i64>,
}

impl ExpandedSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Ids of the expanded sections of a list, in list order.
    pub fn from_sections(sections: &[Section]) -> Self {
        Self::from_ids(sections.iter().filter(|s| s.expanded).map(|s| s.id))
    }

    /// Add an id. Returns false when already present or not storable.
    pub fn insert(&mut self, id: i64) -> bool {
        if id == ALL_SECTIONS_ID || self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Comma-joined form kept in the preference store.
    pub fn to_stored(&self) -> String {
        self.ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the stored form. Parts that are not ids are ignored.
    pub fn from_stored(stored: &str) -> Self {
        Self::from_ids(
            stored
                .split(',')
                .filter_map(|part| part.trim().parse::<i64>().ok()),
        )
    }
}

// ============================================================================
// ExpandedMirror
// ============================================================================

/// In-memory copy of the expanded-sections preference for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedMirror {
    ids: ExpandedSections,
    /// A value exists in the store (possibly an empty one).
    saved: bool,
}

impl ExpandedMirror {
    pub fn new(stored: Option<ExpandedSections>) -> Self {
        match stored {
            Some(ids) => Self { ids, saved: true },
            None => Self::default(),
        }
    }

    pub fn ids(&self) -> &ExpandedSections {
        &self.ids
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Set each section's `expanded` flag from the mirror.
    ///
    /// Until something was saved every section is expanded and the mirror
    /// is seeded with every id.
    pub fn apply(&mut self, sections: &mut [Section]) {
        for section in sections.iter_mut() {
            if self.saved {
                section.expanded = self.ids.contains(section.id);
            } else {
                section.expanded = true;
                self.ids.insert(section.id);
            }
        }
    }

    /// Track a newly expanded section. True when it was not known yet.
    pub fn expand(&mut self, section_id: i64) -> bool {
        self.ids.insert(section_id)
    }

    /// Replace the mirror with what was just written to the store.
    pub fn record_saved(&mut self, ids: ExpandedSections) {
        self.ids = ids;
        self.saved = true;
    }
}

// ============================================================================
// CoursePreferences
// ============================================================================

/// Preference slots of one course.
#[derive(Clone)]
pub struct CoursePreferences {
    store: Arc<dyn PreferenceStore>,
    course_id: i64,
}

impl CoursePreferences {
    pub fn new(store: Arc<dyn PreferenceStore>, course_id: i64) -> Self {
        Self { store, course_id }
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    /// Defaults to false when unset or unreadable.
    pub async fn all_sections_preferred(&self) -> bool {
        let key = all_sections_preferred_key(self.course_id);
        match self.store.get_or(&key, Value::from(0)).await {
            Ok(value) => is_truthy(&value),
            Err(err) => {
                warn!(%key, error = %err, "Failed to read all-sections preference");
                false
            }
        }
    }

    pub async fn set_all_sections_preferred(&self, preferred: bool) {
        let key = all_sections_preferred_key(self.course_id);
        let value = Value::from(if preferred { 1 } else { 0 });
        if let Err(err) = self.store.set(&key, value).await {
            warn!(%key, error = %err, "Failed to store all-sections preference");
        }
    }

    /// `None` when never saved or unreadable.
    pub async fn expanded_sections(&self) -> Option<ExpandedSections> {
        let key = expanded_sections_key(self.course_id);
        match self.store.get(&key).await {
            Ok(Some(Value::String(stored))) => Some(ExpandedSections::from_stored(&stored)),
            Ok(Some(Value::Number(n))) => Some(ExpandedSections::from_ids(n.as_i64())),
            Ok(Some(Value::Null)) | Ok(None) => None,
            Ok(Some(other)) => {
                warn!(%key, value = %other, "Ignoring malformed expanded sections");
                None
            }
            Err(err) => {
                warn!(%key, error = %err, "Failed to read expanded sections");
                None
            }
        }
    }

    pub async fn save_expanded_sections(&self, sections: &ExpandedSections) {
        let key = expanded_sections_key(self.course_id);
        if let Err(err) = self
            .store
            .set(&key, Value::String(sections.to_stored()))
            .await
        {
            warn!(%key, error = %err, "Failed to store expanded sections");
        }
    }
}

impl std::fmt::Debug for CoursePreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoursePreferences")
            .field("course_id", &self.course_id)
            .finish()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => s.trim().parse::<i64>().map(|n| n != 0).unwrap_or(false),
        _ => false,
    }
}
