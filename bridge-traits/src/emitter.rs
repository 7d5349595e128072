//! Host Event Emission
//!
//! The host framework's generic event channel (e.g. React Native's
//! `RCTDeviceEventEmitter`). The core hands over an event name plus a JSON
//! payload; the host delivers it to its listeners.

use serde_json::Value;

use crate::{error::Result, platform::PlatformSendSync};

/// Host event emitter trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::emitter::HostEventEmitter;
/// use serde_json::json;
///
/// fn announce(emitter: &dyn HostEventEmitter) {
///     emitter
///         .emit("nfcStatusChange", json!({ "status": "active" }))
///         .ok();
/// }
/// ```
pub trait HostEventEmitter: PlatformSendSync {
    /// Deliver `payload` to every host listener registered for `event_name`
    fn emit(&self, event_name: &str, payload: Value) -> Result<()>;
}
