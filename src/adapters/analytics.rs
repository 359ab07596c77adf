//! Analytics sink that writes events to the tracing log.

use tracing::info;

use crate::models::AnalyticsEvent;
use crate::traits::AnalyticsSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn log_event(&self, event: AnalyticsEvent) {
        let data = serde_json::Value::Object(event.data);
        info!(
            target: "campus::analytics",
            kind = ?event.event_type,
            ws = %event.ws,
            name = %event.name,
            url = %event.url,
            data = %data,
            "Analytics event"
        );
    }
}
