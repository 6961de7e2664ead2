//! Notification dispatch.
//!
//! The [`NotificationListener`] consumes scheduling events from the bus and
//! hands them to the downstream delivery channels. Delivery transport
//! (email/SMS) is an external collaborator; from this core's perspective
//! dispatch is fire-and-forget.

pub mod listener;

pub use listener::NotificationListener;
