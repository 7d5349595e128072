//! # Event Bus System
//!
//! Provides the event channel between the NFC core and its consumers using
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The event bus system consists of:
//! - **Event Types**: [`NfcEvent`] and its payload structs, serialized exactly
//!   as the host framework expects them
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   emit    ┌───────────┐
//! │ Session control  ├──────────>│           │   subscribe   ┌────────────────┐
//! └──────────────────┘           │ EventBus  ├──────────────>│ Host forwarder │
//!                                │ (broadcast│               └────────────────┘
//! ┌──────────────────┐   emit    │  channel) │   subscribe   ┌────────────────┐
//! │ Event relay      ├──────────>│           ├──────────────>│ Rust consumer  │
//! └──────────────────┘           └───────────┘               └────────────────┘
//! ```
//!
//! The tag interrupt arrives on whatever thread the platform chooses; the
//! channel decouples it from the host's event delivery and keeps events in
//! the order they were emitted.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, NfcEvent, TagDiscovered};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! event_bus
//!     .emit(NfcEvent::TagDiscovered(TagDiscovered::new("04A3F2", false)))
//!     .ok();
//!
//! let event = stream.recv().await.unwrap();
//! assert_eq!(event.name(), "onTagDiscovered");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: Subscriber was too slow and missed `n` events.
//!   Non-fatal; the subscriber continues with newer events.
//! - **`RecvError::Closed`**: All senders have been dropped. Treat as shutdown.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that fall further behind receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Host event name for tag discoveries.
pub const TAG_DISCOVERED_EVENT: &str = "onTagDiscovered";

/// Host event name for scanning status changes.
pub const STATUS_CHANGE_EVENT: &str = "nfcStatusChange";

// ============================================================================
// Event Types
// ============================================================================

/// Top-level event enum published through the event bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum NfcEvent {
    /// A tag entered the field while foreground dispatch was registered
    TagDiscovered(TagDiscovered),
    /// Scanning was started or stopped
    StatusChange(StatusChange),
}

impl NfcEvent {
    /// Event name as seen by host listeners.
    pub fn name(&self) -> &'static str {
        match self {
            NfcEvent::TagDiscovered(_) => TAG_DISCOVERED_EVENT,
            NfcEvent::StatusChange(_) => STATUS_CHANGE_EVENT,
        }
    }

    /// JSON payload handed to host listeners.
    pub fn payload(&self) -> serde_json::Result<Value> {
        match self {
            NfcEvent::TagDiscovered(event) => serde_json::to_value(event),
            NfcEvent::StatusChange(event) => serde_json::to_value(event),
        }
    }
}

/// Payload of `onTagDiscovered`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagDiscovered {
    /// Always true; a failed extraction produces no event at all.
    pub success: bool,
    /// Uppercase hex encoding of the tag identifier.
    pub tag_id: String,
    /// Whether the tag matches the configured info page tag id.
    pub is_info_page_tag: bool,
}

impl TagDiscovered {
    pub fn new(tag_id: impl Into<String>, is_info_page_tag: bool) -> Self {
        Self {
            success: true,
            tag_id: tag_id.into(),
            is_info_page_tag,
        }
    }
}

/// Scanning status reported in `nfcStatusChange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "Stopped NFC scanning")]
    Stopped,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Active => "active",
            ScanStatus::Stopped => "Stopped NFC scanning",
        }
    }
}

/// Payload of `nfcStatusChange`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ScanStatus,
}

impl StatusChange {
    pub fn new(status: ScanStatus) -> Self {
        Self { status }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Uses `tokio::sync::broadcast` internally, which provides:
/// - Multiple producers (clone the `EventBus`)
/// - Multiple consumers (each `subscribe()` creates a new receiver)
/// - Non-blocking sends, so emitting from the platform callback never waits
/// - Lagging detection (slow subscribers get `RecvError::Lagged`)
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NfcEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. `NfcBridgeConfig::validate` rejects that
    /// value before it reaches this point.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers.
    pub fn emit(&self, event: NfcEvent) -> Result<usize, SendError<NfcEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<NfcEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&NfcEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream, NfcEvent};
///
/// let event_bus = EventBus::new(100);
/// let tags_only = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, NfcEvent::TagDiscovered(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<NfcEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<NfcEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function to this stream.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&NfcEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn matches(&self, event: &NfcEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<NfcEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.matches(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive an event without blocking.
    ///
    /// Returns `None` if no events are currently available.
    pub fn try_recv(&mut self) -> Option<Result<NfcEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag_event(tag_id: &str) -> NfcEvent {
        NfcEvent::TagDiscovered(TagDiscovered::new(tag_id, false))
    }

    #[tokio::test]
    async fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);

        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        assert!(bus.emit(tag_event("04A3F2")).is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = NfcEvent::StatusChange(StatusChange::new(ScanStatus::Active));
        assert_eq!(bus.emit(event.clone()).unwrap(), 2);

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_events_keep_emission_order() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        for tag_id in ["01", "02", "03"] {
            bus.emit(tag_event(tag_id)).unwrap();
        }

        for expected in ["01", "02", "03"] {
            match sub.recv().await.unwrap() {
                NfcEvent::TagDiscovered(event) => assert_eq!(event.tag_id, expected),
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_event_stream_with_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| matches!(event, NfcEvent::TagDiscovered(_)));

        bus.emit(NfcEvent::StatusChange(StatusChange::new(ScanStatus::Active)))
            .ok();
        bus.emit(tag_event("04A3F2")).ok();

        assert_eq!(stream.recv().await.unwrap(), tag_event("04A3F2"));
    }

    #[tokio::test]
    async fn test_event_stream_try_recv_empty() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());
        assert!(stream.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();

        for i in 0..5 {
            bus.emit(tag_event(&format!("{:02X}", i))).ok();
        }

        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[test]
    fn test_tag_discovered_payload_shape() {
        let event = NfcEvent::TagDiscovered(TagDiscovered::new("04A3F2", true));

        assert_eq!(event.name(), "onTagDiscovered");
        assert_eq!(
            event.payload().unwrap(),
            json!({ "success": true, "tagId": "04A3F2", "isInfoPageTag": true })
        );
    }

    #[test]
    fn test_status_change_payload_shape() {
        let active = NfcEvent::StatusChange(StatusChange::new(ScanStatus::Active));
        let stopped = NfcEvent::StatusChange(StatusChange::new(ScanStatus::Stopped));

        assert_eq!(active.name(), "nfcStatusChange");
        assert_eq!(active.payload().unwrap(), json!({ "status": "active" }));
        assert_eq!(
            stopped.payload().unwrap(),
            json!({ "status": "Stopped NFC scanning" })
        );
        assert_eq!(ScanStatus::Stopped.as_str(), "Stopped NFC scanning");
    }
}
