//! Session events — decoupled observation of what the presenter does.
//!
//! Events are published after every dispatched command. Observers (the CLI's
//! log forwarder, tests) subscribe without the presenter knowing about them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::ErrorKind;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A session was launched with a fresh stack
    SessionStarted {
        capacity: usize,
        seeded: usize,
        timestamp: DateTime<Utc>,
    },

    /// A command ran against the stack
    OperationApplied {
        operation: String,
        status: String,
        size: usize,
        timestamp: DateTime<Utc>,
    },

    /// A command was refused by the stack or by input validation
    OperationRejected {
        operation: String,
        error_kind: ErrorKind,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// The stack was replaced by an empty one of the same capacity
    StackCleared {
        capacity: usize,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
