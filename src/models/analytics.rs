//! Analytics event descriptors.

use serde::Serialize;
use serde_json::{Map, Value};

/// Kind of analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    ViewItem,
    ViewItemList,
}

/// A fire-and-forget analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub event_type: AnalyticsEventType,
    /// Web service the view corresponds to.
    pub ws: String,
    pub name: String,
    pub data: Map<String, Value>,
    /// Site-relative URL of the equivalent web page.
    pub url: String,
}

impl AnalyticsEvent {
    pub fn view_item(ws: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            event_type: AnalyticsEventType::ViewItem,
            ws: ws.into(),
            name: name.into(),
            data: Map::new(),
            url: url.into(),
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
