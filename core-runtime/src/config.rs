//! # Bridge Configuration Module
//!
//! Provides configuration management for the NFC bridge.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct an
//! `NfcBridgeConfig` holding the platform bridges and settings the core needs.
//! It enforces fail-fast validation so a missing capability is reported when
//! the module is created, not on the first tag interrupt.
//!
//! ## Required Dependencies
//!
//! - `NfcAdapterProvider` - Source of the hardware adapter handle
//! - `ForegroundContextProvider` - The activity foreground dispatch is bound to
//!
//! ## Optional Dependencies
//!
//! - `HostEventEmitter` - Host framework event channel. Without it events are
//!   only available through the Rust event bus.
//!
//! When the `desktop-shims` feature is enabled, the virtual adapter and the
//! desktop foreground context from `bridge-desktop` are injected automatically
//! if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{NfcBridgeConfig, ReentrantStartPolicy};
//! use std::sync::Arc;
//!
//! let config = NfcBridgeConfig::builder()
//!     .adapter_provider(Arc::new(AndroidAdapterProvider::new(context)))
//!     .foreground_context(Arc::new(ReactActivityTracker::new(context)))
//!     .event_emitter(Arc::new(DeviceEventEmitter::new(context)))
//!     .reentrant_start(ReentrantStartPolicy::Reregister)
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{ForegroundContextProvider, HostEventEmitter, NfcAdapterProvider};
use std::sync::Arc;

/// Name under which the module registers with the host framework.
pub const DEFAULT_MODULE_NAME: &str = "TurboNfc";

/// Largest accepted event buffer.
pub const MAX_EVENT_BUFFER_SIZE: usize = 10_000;

/// Behaviour of `start` while a reading session is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentrantStartPolicy {
    /// Fail with `already_reading`, leaving the active session untouched
    #[default]
    Reject,
    /// Re-check preconditions and register dispatch again for the current
    /// foreground activity
    Reregister,
}

/// Configuration for the NFC bridge.
///
/// Use [`NfcBridgeConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct NfcBridgeConfig {
    /// Source of the hardware adapter handle (required)
    pub adapter_provider: Arc<dyn NfcAdapterProvider>,

    /// Foreground activity tracker (required)
    pub foreground_context: Arc<dyn ForegroundContextProvider>,

    /// Host event channel (optional)
    pub event_emitter: Option<Arc<dyn HostEventEmitter>>,

    /// Per-subscriber event buffer
    pub event_buffer_size: usize,

    /// Re-entrant start behaviour
    pub reentrant_start: ReentrantStartPolicy,

    /// Info page tag id the session starts with
    pub info_page_tag_id: Option<String>,

    /// Module name reported to the host
    pub module_name: String,
}

impl std::fmt::Debug for NfcBridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NfcBridgeConfig")
            .field("adapter_provider", &"NfcAdapterProvider { ... }")
            .field("foreground_context", &"ForegroundContextProvider { ... }")
            .field(
                "event_emitter",
                &self
                    .event_emitter
                    .as_ref()
                    .map(|_| "HostEventEmitter { ... }"),
            )
            .field("event_buffer_size", &self.event_buffer_size)
            .field("reentrant_start", &self.reentrant_start)
            .field("info_page_tag_id", &self.info_page_tag_id)
            .field("module_name", &self.module_name)
            .finish()
    }
}

impl NfcBridgeConfig {
    /// Creates a new builder for constructing an `NfcBridgeConfig`.
    pub fn builder() -> NfcBridgeConfigBuilder {
        NfcBridgeConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Event buffer size is within 1..=10,000
    /// - Module name is not empty
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > MAX_EVENT_BUFFER_SIZE {
            return Err(Error::Config(format!(
                "Event buffer size exceeds maximum of {}",
                MAX_EVENT_BUFFER_SIZE
            )));
        }

        if self.module_name.trim().is_empty() {
            return Err(Error::Config("Module name cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn adapter_provider_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "NfcAdapterProvider".to_string(),
        message: "NfcAdapterProvider implementation is required to reach the NFC hardware. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the virtual adapter. \
                 Mobile: inject an adapter provider backed by android.nfc or CoreNFC."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn foreground_context_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "ForegroundContextProvider".to_string(),
        message: "ForegroundContextProvider implementation is required for foreground dispatch. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the main window context. \
                 Mobile: inject a provider reporting the host's current activity."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_adapter_provider() -> Result<Arc<dyn NfcAdapterProvider>> {
    use bridge_desktop::VirtualAdapterProvider;

    let provider: Arc<dyn NfcAdapterProvider> = Arc::new(VirtualAdapterProvider::default());
    Ok(provider)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_adapter_provider() -> Result<Arc<dyn NfcAdapterProvider>> {
    Err(adapter_provider_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_foreground_context() -> Result<Arc<dyn ForegroundContextProvider>> {
    use bridge_desktop::DesktopForegroundContext;

    let context: Arc<dyn ForegroundContextProvider> = Arc::new(DesktopForegroundContext::new());
    Ok(context)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_foreground_context() -> Result<Arc<dyn ForegroundContextProvider>> {
    Err(foreground_context_missing_error())
}

/// Builder for constructing [`NfcBridgeConfig`] instances.
///
/// Call [`build()`](NfcBridgeConfigBuilder::build) to create the final config;
/// the builder fills platform defaults where available and validates the
/// result.
#[derive(Default)]
pub struct NfcBridgeConfigBuilder {
    adapter_provider: Option<Arc<dyn NfcAdapterProvider>>,
    foreground_context: Option<Arc<dyn ForegroundContextProvider>>,
    event_emitter: Option<Arc<dyn HostEventEmitter>>,
    event_buffer_size: Option<usize>,
    reentrant_start: ReentrantStartPolicy,
    info_page_tag_id: Option<String>,
    module_name: Option<String>,
}

impl NfcBridgeConfigBuilder {
    /// Sets the adapter provider (required unless `desktop-shims` is enabled).
    pub fn adapter_provider(mut self, provider: Arc<dyn NfcAdapterProvider>) -> Self {
        self.adapter_provider = Some(provider);
        self
    }

    /// Sets the foreground context provider (required unless `desktop-shims`
    /// is enabled).
    pub fn foreground_context(mut self, context: Arc<dyn ForegroundContextProvider>) -> Self {
        self.foreground_context = Some(context);
        self
    }

    /// Sets the host event emitter.
    pub fn event_emitter(mut self, emitter: Arc<dyn HostEventEmitter>) -> Self {
        self.event_emitter = Some(emitter);
        self
    }

    /// Sets the per-subscriber event buffer.
    ///
    /// Default: 100 events
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Sets the re-entrant start behaviour.
    ///
    /// Default: [`ReentrantStartPolicy::Reject`]
    pub fn reentrant_start(mut self, policy: ReentrantStartPolicy) -> Self {
        self.reentrant_start = policy;
        self
    }

    /// Seeds the info page tag id. The value is stored verbatim.
    pub fn info_page_tag_id(mut self, tag_id: impl Into<String>) -> Self {
        self.info_page_tag_id = Some(tag_id.into());
        self
    }

    /// Overrides the module name reported to the host.
    ///
    /// Default: `TurboNfc`
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityMissing` when a required bridge was not
    /// provided and no platform default exists, or `Error::Config` when a
    /// setting is out of range.
    pub fn build(self) -> Result<NfcBridgeConfig> {
        let adapter_provider = match self.adapter_provider {
            Some(provider) => provider,
            None => provide_default_adapter_provider()?,
        };

        let foreground_context = match self.foreground_context {
            Some(context) => context,
            None => provide_default_foreground_context()?,
        };

        let config = NfcBridgeConfig {
            adapter_provider,
            foreground_context,
            event_emitter: self.event_emitter,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
            reentrant_start: self.reentrant_start,
            info_page_tag_id: self.info_page_tag_id,
            module_name: self
                .module_name
                .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
