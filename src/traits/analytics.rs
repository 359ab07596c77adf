//! Analytics sink.

use crate::models::AnalyticsEvent;

/// Fire-and-forget analytics destination.
pub trait AnalyticsSink: Send + Sync {
    fn log_event(&self, event: AnalyticsEvent);
}
