//! Domain events and the publish/subscribe contract used to distribute them.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::{Event, PublishableEvents};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
