//! Slotbook event bus.
//!
//! Status transitions and staff assignments are published here for
//! downstream notification delivery (email/SMS dispatchers subscribe).
//! Publishing is fire-and-forget: the scheduling core never waits on, or
//! fails because of, a consumer.

pub mod bus;

pub use bus::{EventBus, SchedulingEvent};
