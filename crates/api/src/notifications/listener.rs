//! Event-to-notification forwarding loop.
//!
//! Subscribes to the scheduling event bus and records each event for the
//! downstream dispatcher. A failed or lagging consumer never affects the
//! request that published the event.

use tokio::sync::broadcast;

use slotbook_events::SchedulingEvent;

/// Forwards scheduling events to the notification dispatcher.
pub struct NotificationListener;

impl NotificationListener {
    /// Run the forwarding loop.
    ///
    /// Exits when the channel closes (i.e. the
    /// [`EventBus`](slotbook_events::EventBus) is dropped). A lagged
    /// receiver skips ahead rather than terminating: missed notifications
    /// are acceptable, a dead listener is not.
    pub async fn run(mut receiver: broadcast::Receiver<SchedulingEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::dispatch(&event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Notification listener lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed; notification listener stopping");
                    break;
                }
            }
        }
    }

    fn dispatch(event: &SchedulingEvent) {
        tracing::info!(
            event_type = %event.event_type,
            tenant_id = event.tenant_id,
            booking_id = event.booking_id,
            "Dispatching notification"
        );
    }
}
