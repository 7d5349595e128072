//! Shared session context.
//!
//! Every piece of mutable bridge state lives behind one mutex here so that
//! application calls and the platform's tag callback serialize on the same
//! lock, whichever threads they arrive on.

use std::sync::{Arc, Mutex, MutexGuard};

use bridge_traits::{
    foreground::{ActivityHandle, ForegroundContextProvider},
    nfc::{NfcAdapter, NfcAdapterProvider},
};
use core_runtime::{
    config::{NfcBridgeConfig, ReentrantStartPolicy},
    events::{EventBus, NfcEvent},
};
use uuid::Uuid;

/// Reading session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Reading {
        /// Correlates log lines of one session
        session_id: Uuid,
        /// Activity foreground dispatch was registered for
        activity: ActivityHandle,
    },
}

impl SessionState {
    pub fn is_reading(&self) -> bool {
        matches!(self, SessionState::Reading { .. })
    }
}

#[derive(Default)]
pub(crate) struct SessionInner {
    pub(crate) adapter: Option<Arc<dyn NfcAdapter>>,
    pub(crate) state: SessionState,
    pub(crate) reference_tag_id: Option<String>,
}

/// State and collaborators shared by the probe, the controller and the relay.
pub struct NfcContext {
    adapter_provider: Arc<dyn NfcAdapterProvider>,
    foreground_context: Arc<dyn ForegroundContextProvider>,
    reentrant_start: ReentrantStartPolicy,
    event_bus: EventBus,
    inner: Mutex<SessionInner>,
}

impl NfcContext {
    /// Build a context from a validated configuration.
    pub fn new(config: &NfcBridgeConfig) -> Self {
        Self::with_event_bus(config, EventBus::new(config.event_buffer_size))
    }

    /// Build a context publishing onto an existing event bus.
    pub fn with_event_bus(config: &NfcBridgeConfig, event_bus: EventBus) -> Self {
        Self {
            adapter_provider: Arc::clone(&config.adapter_provider),
            foreground_context: Arc::clone(&config.foreground_context),
            reentrant_start: config.reentrant_start,
            event_bus,
            inner: Mutex::new(SessionInner {
                reference_tag_id: config.info_page_tag_id.clone(),
                ..SessionInner::default()
            }),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) fn reentrant_start(&self) -> ReentrantStartPolicy {
        self.reentrant_start
    }

    pub(crate) fn current_activity(&self) -> Option<ActivityHandle> {
        self.foreground_context.current_activity()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionInner> {
        // State stays consistent across a panicking platform call: every
        // transition is a single assignment.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached adapter handle, asking the provider until one is obtained.
    pub(crate) fn acquire_adapter(&self, inner: &mut SessionInner) -> Option<Arc<dyn NfcAdapter>> {
        if inner.adapter.is_none() {
            inner.adapter = self.adapter_provider.default_adapter();
        }
        inner.adapter.clone()
    }

    /// Publish onto the bus, returning how many subscribers received it.
    ///
    /// Called with the session lock held, so it must not log: a host
    /// `LoggerSink` may call back into the module.
    pub(crate) fn publish(&self, event: NfcEvent) -> usize {
        self.event_bus.emit(event).unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::{DesktopForegroundContext, VirtualAdapterProvider, VirtualNfcAdapter};

    fn config(provider: Arc<VirtualAdapterProvider>) -> NfcBridgeConfig {
        NfcBridgeConfig::builder()
            .adapter_provider(provider)
            .foreground_context(Arc::new(DesktopForegroundContext::new()))
            .info_page_tag_id("04A3F2")
            .build()
            .unwrap()
    }

    #[test]
    fn test_adapter_cached_after_first_lookup() {
        let provider = Arc::new(VirtualAdapterProvider::with_adapter(Arc::new(
            VirtualNfcAdapter::new(true),
        )));
        let context = NfcContext::new(&config(Arc::clone(&provider)));

        let mut inner = context.lock();
        assert!(context.acquire_adapter(&mut inner).is_some());
        assert!(context.acquire_adapter(&mut inner).is_some());
        assert_eq!(provider.lookup_count(), 1);
    }

    #[test]
    fn test_missing_adapter_looked_up_again() {
        let provider = Arc::new(VirtualAdapterProvider::without_hardware());
        let context = NfcContext::new(&config(Arc::clone(&provider)));

        let mut inner = context.lock();
        assert!(context.acquire_adapter(&mut inner).is_none());
        assert!(context.acquire_adapter(&mut inner).is_none());
        assert_eq!(provider.lookup_count(), 2);
    }

    #[test]
    fn test_seeded_reference_tag_id() {
        let provider = Arc::new(VirtualAdapterProvider::default());
        let context = NfcContext::new(&config(provider));

        assert_eq!(context.lock().reference_tag_id.as_deref(), Some("04A3F2"));
        assert_eq!(context.lock().state, SessionState::Idle);
    }
}
