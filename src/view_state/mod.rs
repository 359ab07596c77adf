//! View commands emitted by the controllers.
//!
//! Controllers never touch a UI. They push [`ViewCommand`]s through a
//! [`CommandSink`] and the host drains the receiving end after each call.
//!
//! ```text
//! host call ──▶ controller (&mut self) ──▶ CommandSink ──▶ host receiver
//! ```
//!
//! ## Components
//!
//! - [`ViewCommand`]: one instruction for the host view
//! - [`NavigationRequest`]: a route plus parameters
//! - [`CommandSink`]: sending half, safe to use after the host hung up
//! - [`GenerationCounter`] / [`LoadTicket`]: stale-result detection

mod generation;

pub use generation::{GenerationCounter, LoadTicket};

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::ModuleAction;

/// A route the host should push onto its navigation stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationRequest {
    pub path: String,
    pub params: Map<String, Value>,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Instruction for the host view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    /// Bring a module into view.
    ScrollToModule { module_id: i64 },
    ScrollToTop,
    /// Open the side blocks panel, focused on a block instance.
    OpenSideBlocks { instance_id: i64 },
    /// Blocking notice for the user.
    ShowError { message: String },
    /// Leave the current screen.
    NavigateBack,
    /// Content height changed; re-evaluate the infinite-scroll trigger.
    CheckInfiniteScroll,
    /// Run the action resolved for a module.
    RunModuleAction { module_id: i64, action: ModuleAction },
    Navigate(NavigationRequest),
}

/// Sending half of the view command channel.
#[derive(Debug, Clone)]
pub struct CommandSink {
    sender: UnboundedSender<ViewCommand>,
}

impl CommandSink {
    pub fn new(sender: UnboundedSender<ViewCommand>) -> Self {
        Self { sender }
    }

    /// Create a sink together with the receiver the host drains.
    pub fn channel() -> (Self, UnboundedReceiver<ViewCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Send a command. Commands for a host that went away are dropped.
    pub fn emit(&self, command: ViewCommand) {
        if let Err(err) = self.sender.send(command) {
            tracing::debug!(command = ?err.0, "View command dropped, host receiver closed");
        }
    }
}
