//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application; any
//! number of subscribers independently receive every published
//! [`SchedulingEvent`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::types::DbId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SchedulingEvent
// ---------------------------------------------------------------------------

/// A domain event emitted by the scheduling core.
///
/// Constructed via [`SchedulingEvent::new`] and enriched with the builder
/// methods [`with_booking`](SchedulingEvent::with_booking),
/// [`with_actor`](SchedulingEvent::with_actor), and
/// [`with_payload`](SchedulingEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingEvent {
    /// Dot-separated event name, e.g. `"booking.confirmed"`.
    pub event_type: String,

    /// The tenant whose data the event concerns.
    pub tenant_id: DbId,

    /// The booking the event concerns, if any.
    pub booking_id: Option<DbId>,

    /// Optional id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SchedulingEvent {
    /// Create a new event with the required `event_type` and tenant scope.
    pub fn new(event_type: impl Into<String>, tenant_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            tenant_id,
            booking_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the subject booking to the event.
    pub fn with_booking(mut self, booking_id: DbId) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<SchedulingEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// notification delivery is best-effort by contract.
    pub fn publish(&self, event: SchedulingEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Open a new subscription receiving all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SchedulingEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
