//! Host-facing NFC module.

use std::sync::Arc;

use bridge_traits::{emitter::HostEventEmitter, nfc::DiscoveryIntent};
use core_nfc::{
    CapabilityProbe, EventRelay, NfcContext, NfcError, SessionController, SessionState,
    StartOutcome,
};
use core_runtime::{
    config::NfcBridgeConfig,
    events::{EventStream, NfcEvent, RecvError, TagDiscovered},
};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::error::{ModuleRejection, Result, ServiceError};
use crate::listeners::ListenerRegistry;

/// The operations a host framework binds to its JavaScript (or other) side.
pub struct NfcModule {
    name: String,
    context: Arc<NfcContext>,
    probe: CapabilityProbe,
    controller: SessionController,
    relay: EventRelay,
    listeners: ListenerRegistry,
    event_emitter: Option<Arc<dyn HostEventEmitter>>,
}

impl NfcModule {
    /// Build the module from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] when the configuration does not
    /// validate.
    pub fn new(config: NfcBridgeConfig) -> Result<Self> {
        config.validate()?;

        let context = Arc::new(NfcContext::new(&config));
        info!(module = %config.module_name, ?config, "NFC module initialized");

        Ok(Self {
            name: config.module_name.clone(),
            probe: CapabilityProbe::new(Arc::clone(&context)),
            controller: SessionController::new(Arc::clone(&context)),
            relay: EventRelay::new(Arc::clone(&context)),
            listeners: ListenerRegistry::new(),
            event_emitter: config.event_emitter.clone(),
            context,
        })
    }

    /// Name the module is registered under on the host side.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves `true` when NFC hardware is present.
    ///
    /// # Errors
    ///
    /// Rejects with `nfc_not_supported` otherwise.
    pub fn is_supported(&self) -> std::result::Result<bool, ModuleRejection> {
        if self.probe.is_supported() {
            Ok(true)
        } else {
            Err(NfcError::NotSupported.into())
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.probe.is_enabled()
    }

    pub fn start_tag_reading(&self) -> std::result::Result<StartOutcome, ModuleRejection> {
        self.controller.start().map_err(ModuleRejection::from)
    }

    pub fn stop_tag_reading(&self) -> std::result::Result<bool, ModuleRejection> {
        self.controller.stop().map_err(ModuleRejection::from)
    }

    pub fn set_info_page_tag_id(&self, tag_id: impl Into<String>) -> bool {
        self.controller.set_reference_tag_id(tag_id);
        true
    }

    pub fn add_listener(&self, event_name: &str) {
        self.listeners.add(event_name);
    }

    pub fn remove_listeners(&self, count: usize) {
        self.listeners.remove(count);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }

    /// Platform callback for a newly delivered intent.
    pub fn on_new_intent(&self, intent: &dyn DiscoveryIntent) -> Option<TagDiscovered> {
        self.relay.on_new_intent(intent)
    }

    pub fn session_state(&self) -> SessionState {
        self.controller.state()
    }

    /// Subscribe to module events directly, bypassing the host emitter.
    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.context.event_bus().subscribe())
    }

    /// Spawn the task delivering module events to the host emitter.
    ///
    /// The subscription is taken before this returns, so no event published
    /// afterwards is missed. The task ends once the module is dropped.
    ///
    /// # Errors
    ///
    /// Fails when no host emitter is configured or when called outside a
    /// Tokio runtime.
    pub fn start_event_forwarding(&self) -> Result<JoinHandle<()>> {
        let emitter = self
            .event_emitter
            .clone()
            .ok_or_else(|| ServiceError::CapabilityMissing {
                capability: "HostEventEmitter".to_string(),
                message: "Configure an event emitter with NfcBridgeConfig::builder().event_emitter(...)".to_string(),
            })?;
        let runtime = Handle::try_current()
            .map_err(|e| ServiceError::InitializationFailed(e.to_string()))?;

        let stream = self.subscribe();
        debug!(module = %self.name, "Event forwarding started");
        Ok(runtime.spawn(forward_events(stream, emitter)))
    }
}

async fn forward_events(mut stream: EventStream, emitter: Arc<dyn HostEventEmitter>) {
    loop {
        match stream.recv().await {
            Ok(event) => deliver(&event, emitter.as_ref()),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event forwarder lagged behind");
            }
            Err(RecvError::Closed) => {
                debug!("Event bus closed, forwarder exiting");
                break;
            }
        }
    }
}

fn deliver(event: &NfcEvent, emitter: &dyn HostEventEmitter) {
    let payload = match event.payload() {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, event = event.name(), "Failed to serialize event payload");
            return;
        }
    };

    if let Err(e) = emitter.emit(event.name(), payload) {
        warn!(error = %e, event = event.name(), "Failed to emit host event");
    }
}
