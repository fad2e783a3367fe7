//! In-memory event bus for tests/dev.

use std::collections::HashMap;
use std::sync::{Mutex, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription};
use crate::event::Event;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("event bus lock poisoned")]
    Poisoned,
}

/// In-memory pub/sub bus keyed by event name.
///
/// - No IO / no async
/// - Best-effort fan-out; dead subscribers are dropped on publish
/// - Events nobody subscribed to are discarded
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<M>>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Event,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        let Some(handlers) = subs.get_mut(message.event_type()) else {
            tracing::trace!(event_type = message.event_type(), "no subscribers");
            return Ok(());
        };

        // Drop any dead subscribers while publishing.
        handlers.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self, event_type: &str) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.entry(event_type.to_string()).or_default().push(tx);
        }

        Subscription::new(rx)
    }
}
