//! Capability probe.
//!
//! Answers whether NFC hardware is present and switched on. Both answers are
//! re-derived on every call; only the adapter handle itself is cached.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::NfcContext;

pub struct CapabilityProbe {
    context: Arc<NfcContext>,
}

impl CapabilityProbe {
    pub fn new(context: Arc<NfcContext>) -> Self {
        Self { context }
    }

    /// True iff an adapter handle can be obtained.
    pub fn is_supported(&self) -> bool {
        let supported = {
            let mut inner = self.context.lock();
            self.context.acquire_adapter(&mut inner).is_some()
        };
        debug!(supported, "NFC support checked");
        supported
    }

    /// True iff an adapter exists and reports NFC switched on.
    ///
    /// Never fails: a missing adapter or a failing query both read as `false`.
    pub fn is_enabled(&self) -> bool {
        let adapter = {
            let mut inner = self.context.lock();
            self.context.acquire_adapter(&mut inner)
        };
        let Some(adapter) = adapter else {
            debug!("No NFC adapter, reporting disabled");
            return false;
        };

        match adapter.is_enabled() {
            Ok(enabled) => enabled,
            Err(error) => {
                warn!(%error, "Error checking NFC enabled state");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::{DesktopForegroundContext, VirtualAdapterProvider, VirtualNfcAdapter};
    use bridge_traits::{
        error::{BridgeError, Result},
        foreground::ActivityHandle,
        nfc::{NfcAdapter, NfcAdapterProvider},
    };
    use core_runtime::config::NfcBridgeConfig;
    use mockall::mock;

    mock! {
        Adapter {}

        impl NfcAdapter for Adapter {
            fn is_enabled(&self) -> Result<bool>;
            fn enable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()>;
            fn disable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()>;
        }
    }

    struct FixedProvider(Option<Arc<dyn NfcAdapter>>);

    impl NfcAdapterProvider for FixedProvider {
        fn default_adapter(&self) -> Option<Arc<dyn NfcAdapter>> {
            self.0.clone()
        }
    }

    fn probe_with(provider: Arc<dyn NfcAdapterProvider>) -> CapabilityProbe {
        let config = NfcBridgeConfig::builder()
            .adapter_provider(provider)
            .foreground_context(Arc::new(DesktopForegroundContext::new()))
            .build()
            .unwrap();
        CapabilityProbe::new(Arc::new(NfcContext::new(&config)))
    }

    #[test]
    fn test_supported_with_adapter() {
        let probe = probe_with(Arc::new(VirtualAdapterProvider::default()));
        assert!(probe.is_supported());
    }

    #[test]
    fn test_unsupported_without_adapter() {
        let probe = probe_with(Arc::new(VirtualAdapterProvider::without_hardware()));
        assert!(!probe.is_supported());
        assert!(!probe.is_supported());
    }

    #[test]
    fn test_enabled_false_without_adapter() {
        let probe = probe_with(Arc::new(VirtualAdapterProvider::without_hardware()));
        assert!(!probe.is_enabled());
    }

    #[test]
    fn test_enabled_tracks_switch_on_every_call() {
        let adapter = Arc::new(VirtualNfcAdapter::new(false));
        let probe = probe_with(Arc::new(VirtualAdapterProvider::with_adapter(Arc::clone(
            &adapter,
        ))));

        assert!(!probe.is_enabled());
        adapter.set_enabled(true);
        assert!(probe.is_enabled());
    }

    #[test]
    fn test_enabled_query_failure_reads_false() {
        let mut adapter = MockAdapter::new();
        adapter
            .expect_is_enabled()
            .times(1)
            .returning(|| Err(BridgeError::OperationFailed("binder died".to_string())));

        let probe = probe_with(Arc::new(FixedProvider(Some(Arc::new(adapter)))));
        assert!(!probe.is_enabled());
    }
}
