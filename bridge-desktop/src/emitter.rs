//! Host Event Emitter Implementations

use bridge_traits::{
    emitter::HostEventEmitter,
    error::{BridgeError, Result},
};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;

/// Emitter that writes every event to the tracing pipeline.
#[derive(Debug, Clone, Default)]
pub struct TracingEventEmitter;

impl TracingEventEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl HostEventEmitter for TracingEventEmitter {
    fn emit(&self, event_name: &str, payload: Value) -> Result<()> {
        info!(event = event_name, payload = %payload, "Host event");
        Ok(())
    }
}

/// Emitter that hands events to a channel drained by the desktop shell.
#[derive(Debug, Clone)]
pub struct ChannelEventEmitter {
    sender: mpsc::UnboundedSender<(String, Value)>,
}

impl ChannelEventEmitter {
    /// Create an emitter and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, Value)>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl HostEventEmitter for ChannelEventEmitter {
    fn emit(&self, event_name: &str, payload: Value) -> Result<()> {
        self.sender
            .send((event_name.to_string(), payload))
            .map_err(|_| BridgeError::EmitFailed("host event channel closed".to_string()))
    }
}
