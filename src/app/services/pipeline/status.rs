//! Status channel between the pipeline worker and the control surface
//!
//! The worker only ever sends; the receiver sees a stream of events that ends
//! with [`StatusEvent::Finished`].

use crate::app::models::StatusEvent;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

/// Sending half of the status channel
///
/// A detached sender drops every event, for library callers that do not
/// watch progress.
#[derive(Debug, Clone, Default)]
pub struct StatusSender {
    inner: Option<UnboundedSender<StatusEvent>>,
}

impl StatusSender {
    /// A sender with no receiver
    pub fn detached() -> Self {
        Self::default()
    }

    /// Send an event; a closed receiver is not an error for the worker
    pub fn send(&self, event: StatusEvent) {
        if let Some(sender) = &self.inner {
            if sender.send(event).is_err() {
                debug!("Status receiver closed; dropping event");
            }
        }
    }

    /// Send a free-form message
    pub fn message(&self, message: impl Into<String>) {
        self.send(StatusEvent::Message(message.into()));
    }
}

/// Create a connected status channel
pub fn status_channel() -> (StatusSender, UnboundedReceiver<StatusEvent>) {
    let (tx, rx) = unbounded_channel();
    (StatusSender { inner: Some(tx) }, rx)
}
