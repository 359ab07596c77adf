//! Application events and the in-process event bus.
//!
//! Controllers subscribe when they initialize and drop their
//! [`Subscription`] on dispose. The bus is a tokio broadcast channel: a
//! publisher never waits, and a subscriber that falls more than the
//! channel capacity behind skips the oldest events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::{debug, warn};

/// Events buffered per subscriber before the oldest are dropped.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// Request to show a given tab of the course screen.
///
/// `name` is set when the request targets a named tab (participants, grades,
/// ...) rather than the contents tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectCourseTabEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub section_id: Option<i64>,
    #[serde(default)]
    pub section_number: Option<i64>,
}

/// A module of a course was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModuleViewedEvent {
    pub course_id: i64,
    pub module_id: i64,
    #[serde(default)]
    pub section_id: Option<i64>,
    /// Milliseconds since the epoch.
    pub time_access: i64,
}

/// Events published across the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    SelectCourseTab(SelectCourseTabEvent),
    CourseModuleViewed(CourseModuleViewedEvent),
    /// Site configuration or info changed.
    SiteUpdated { site_id: String },
    /// The current page should reload its data.
    RefreshPage,
}

/// Multi-subscriber event bus. Cloning shares the same bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUS_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` events per subscriber.
    ///
    /// # Arguments
    /// * `capacity` - Must be greater than zero
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber. Events published from now on are queued
    /// on the returned handle until it is dropped or turned off.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Deliver an event to every live subscriber.
    ///
    /// # Returns
    /// How many subscribers received the event (zero when nobody listens)
    pub fn publish(&self, event: AppEvent) -> usize {
        let delivered = self.sender.send(event.clone()).unwrap_or(0);
        debug!(?event, delivered, "Published event");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a bus registration. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<AppEvent>,
}

impl Subscription {
    /// Next queued event, if any, without waiting.
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event subscriber lagged, oldest events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event subscriber lagged, oldest events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take every queued event.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Unsubscribe explicitly.
    pub fn off(self) {}
}
