//! Virtual NFC Adapter Implementation

use bridge_traits::{
    error::{BridgeError, Result},
    foreground::ActivityHandle,
    nfc::{DiscoveryIntent, NfcAdapter, NfcAdapterProvider, RawTag, EXTRA_TAG},
};
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process stand-in for a hardware NFC adapter.
///
/// Tracks which activity holds foreground dispatch and lets callers inject
/// a one-shot failure into the next registration or deregistration call.
pub struct VirtualNfcAdapter {
    enabled: AtomicBool,
    dispatch_owner: Mutex<Option<ActivityHandle>>,
    registrations: AtomicUsize,
    deregistrations: AtomicUsize,
    enable_failure: Mutex<Option<String>>,
    disable_failure: Mutex<Option<String>>,
}

impl VirtualNfcAdapter {
    /// Create an adapter with the NFC switch in the given position.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            dispatch_owner: Mutex::new(None),
            registrations: AtomicUsize::new(0),
            deregistrations: AtomicUsize::new(0),
            enable_failure: Mutex::new(None),
            disable_failure: Mutex::new(None),
        }
    }

    /// Flip the NFC switch.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Activity currently holding foreground dispatch.
    pub fn dispatch_owner(&self) -> Option<ActivityHandle> {
        lock(&self.dispatch_owner).clone()
    }

    /// Number of successful `enable_foreground_dispatch` calls.
    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Number of successful `disable_foreground_dispatch` calls.
    pub fn deregistration_count(&self) -> usize {
        self.deregistrations.load(Ordering::SeqCst)
    }

    /// Make the next `enable_foreground_dispatch` call fail with `message`.
    pub fn fail_next_enable(&self, message: impl Into<String>) {
        *lock(&self.enable_failure) = Some(message.into());
    }

    /// Make the next `disable_foreground_dispatch` call fail with `message`.
    pub fn fail_next_disable(&self, message: impl Into<String>) {
        *lock(&self.disable_failure) = Some(message.into());
    }
}

impl Default for VirtualNfcAdapter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NfcAdapter for VirtualNfcAdapter {
    fn is_enabled(&self) -> Result<bool> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    fn enable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()> {
        if let Some(message) = lock(&self.enable_failure).take() {
            return Err(BridgeError::OperationFailed(message));
        }

        *lock(&self.dispatch_owner) = Some(activity.clone());
        self.registrations.fetch_add(1, Ordering::SeqCst);
        debug!(activity = activity.id(), "Foreground dispatch enabled");
        Ok(())
    }

    fn disable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()> {
        if let Some(message) = lock(&self.disable_failure).take() {
            return Err(BridgeError::OperationFailed(message));
        }

        let mut owner = lock(&self.dispatch_owner);
        if owner.as_ref() == Some(activity) {
            *owner = None;
        }
        self.deregistrations.fetch_add(1, Ordering::SeqCst);
        debug!(activity = activity.id(), "Foreground dispatch disabled");
        Ok(())
    }
}

/// Adapter provider for desktop builds.
///
/// Counts lookups so callers can observe whether the handle is cached.
pub struct VirtualAdapterProvider {
    adapter: Option<Arc<VirtualNfcAdapter>>,
    lookups: AtomicUsize,
}

impl VirtualAdapterProvider {
    /// Provider for a machine with the given virtual adapter.
    pub fn with_adapter(adapter: Arc<VirtualNfcAdapter>) -> Self {
        Self {
            adapter: Some(adapter),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Provider for a machine without NFC hardware.
    pub fn without_hardware() -> Self {
        Self {
            adapter: None,
            lookups: AtomicUsize::new(0),
        }
    }

    /// How many times `default_adapter` has been called.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for VirtualAdapterProvider {
    fn default() -> Self {
        Self::with_adapter(Arc::new(VirtualNfcAdapter::default()))
    }
}

impl NfcAdapterProvider for VirtualAdapterProvider {
    fn default_adapter(&self) -> Option<Arc<dyn NfcAdapter>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.adapter
            .as_ref()
            .map(|adapter| Arc::clone(adapter) as Arc<dyn NfcAdapter>)
    }
}

/// Simulated tag-discovery intent.
#[derive(Debug, Clone)]
pub struct VirtualTagIntent {
    sdk_level: u32,
    tag: Option<RawTag>,
}

impl VirtualTagIntent {
    /// Intent carrying `tag`, produced on `sdk_level`.
    pub fn new(sdk_level: u32, tag: RawTag) -> Self {
        Self {
            sdk_level,
            tag: Some(tag),
        }
    }

    /// Intent without a tag extra (e.g. a plain activity relaunch).
    pub fn empty(sdk_level: u32) -> Self {
        Self {
            sdk_level,
            tag: None,
        }
    }
}

impl DiscoveryIntent for VirtualTagIntent {
    fn sdk_level(&self) -> u32 {
        self.sdk_level
    }

    fn typed_tag(&self) -> Option<RawTag> {
        self.tag.clone()
    }

    fn legacy_extra(&self, key: &str) -> Option<Box<dyn Any + Send>> {
        if key != EXTRA_TAG {
            return None;
        }
        self.tag
            .clone()
            .map(|tag| Box::new(tag) as Box<dyn Any + Send>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_adapter_dispatch_tracking() {
        let adapter = VirtualNfcAdapter::new(true);
        let activity = ActivityHandle::new("MainActivity");

        adapter.enable_foreground_dispatch(&activity).unwrap();
        assert_eq!(adapter.dispatch_owner(), Some(activity.clone()));
        assert_eq!(adapter.registration_count(), 1);

        adapter.disable_foreground_dispatch(&activity).unwrap();
        assert_eq!(adapter.dispatch_owner(), None);
        assert_eq!(adapter.deregistration_count(), 1);
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let adapter = VirtualNfcAdapter::new(true);
        let activity = ActivityHandle::new("MainActivity");
        adapter.fail_next_enable("dispatch refused");

        let err = adapter.enable_foreground_dispatch(&activity).unwrap_err();
        assert!(err.to_string().contains("dispatch refused"));
        assert_eq!(adapter.dispatch_owner(), None);

        adapter.enable_foreground_dispatch(&activity).unwrap();
        assert_eq!(adapter.registration_count(), 1);
    }

    #[test]
    fn test_enabled_switch() {
        let adapter = VirtualNfcAdapter::new(false);
        assert!(!adapter.is_enabled().unwrap());

        adapter.set_enabled(true);
        assert!(adapter.is_enabled().unwrap());
    }

    #[test]
    fn test_provider_without_hardware() {
        let provider = VirtualAdapterProvider::without_hardware();
        assert!(provider.default_adapter().is_none());
        assert_eq!(provider.lookup_count(), 1);
    }

    #[test]
    fn test_intent_paths_carry_same_tag() {
        let tag = RawTag::new(vec![0x04, 0xA3, 0xF2]);
        let intent = VirtualTagIntent::new(34, tag.clone());

        let legacy = intent
            .legacy_extra(EXTRA_TAG)
            .and_then(|extra| extra.downcast::<RawTag>().ok())
            .map(|boxed| *boxed);

        assert_eq!(intent.typed_tag(), Some(tag.clone()));
        assert_eq!(legacy, Some(tag));
        assert!(intent.legacy_extra("android.nfc.extra.ID").is_none());
    }
}
