//! Event publishing/subscription abstraction (mechanics only).
//!
//! Aggregates never talk to a bus directly: they append events to their own
//! log ([`PublishableEvents`]) and the calling use case hands that log to a
//! bus after the operation completes.
//!
//! Subscriptions are keyed by event name (`Event::event_type`), so a consumer
//! interested in `invoice.created` never sees draft updates.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use crate::event::{Event, PublishableEvents};

/// A subscription to one event name.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = bus.subscribe("invoice.created");
/// bus.publish_from(&mut invoice)?;
///
/// for event in subscription.drain() {
///     project(event);
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Collect every message delivered so far without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ## Delivery
///
/// - Each published message goes to every live subscriber of its event name.
/// - Messages from a single `publish_from` call arrive in log order.
/// - Consumers should be idempotent; republishing is the caller's decision.
///
/// The trait requires `Send + Sync`, meaning implementations must be safe to share across
/// threads.
pub trait EventBus<M>: Send + Sync
where
    M: Event,
{
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self, event_type: &str) -> Subscription<M>;

    /// Drain `source`'s event log and publish every event in order.
    ///
    /// Returns the number of events published. On error the remaining
    /// events of the drained batch are dropped.
    fn publish_from<P>(&self, source: &mut P) -> Result<usize, Self::Error>
    where
        P: PublishableEvents,
        P::Event: Into<M>,
        Self: Sized,
    {
        let events = source.take_events();
        let count = events.len();
        for event in events {
            self.publish(event.into())?;
        }
        tracing::debug!(count, "published domain events");
        Ok(count)
    }
}

impl<M, B> EventBus<M> for Arc<B>
where
    M: Event,
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, event_type: &str) -> Subscription<M> {
        (**self).subscribe(event_type)
    }
}
