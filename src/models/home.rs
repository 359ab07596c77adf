//! Home screen tab models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A handler registered to contribute a tab to the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeHandler {
    pub title: String,
    pub page: String,
    #[serde(default)]
    pub page_params: Map<String, Value>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub priority: i32,
}

impl HomeHandler {
    pub fn new(title: impl Into<String>, page: impl Into<String>, priority: i32) -> Self {
        Self {
            title: title.into(),
            page: page.into(),
            page_params: Map::new(),
            class: None,
            icon: None,
            badge: None,
            priority,
        }
    }
}

/// A tab shown on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeTab {
    /// Full route of the tab page.
    pub page: String,
    pub page_params: Map<String, Value>,
    pub title: String,
    pub class: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
}
