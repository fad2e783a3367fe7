use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - designed to be **append-only**
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "invoice.created").
    ///
    /// Buses route on this name.
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// An object that records domain events as a side channel of its operations.
///
/// The owner appends to an internal log; a collaborator (usually an
/// [`EventBus`](crate::EventBus)) drains it once the operation completes.
pub trait PublishableEvents {
    type Event: Event;

    /// Events recorded so far, oldest first.
    fn events(&self) -> &[Self::Event];

    /// Drain the log, leaving it empty.
    fn take_events(&mut self) -> Vec<Self::Event>;
}
