//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (NFC adapter,
//! foreground context, host event emitter) into the NFC core and exposes the
//! module operations a host framework binds. Desktop apps typically enable the
//! `desktop-shims` feature (which depends on `bridge-desktop`) to run against
//! the virtual adapter; mobile hosts build an [`NfcBridgeConfig`] with their
//! own bridges and call [`NfcModule::new`].

pub mod error;
pub mod listeners;
pub mod module;

pub use error::{ModuleRejection, Result, ServiceError};
pub use listeners::ListenerRegistry;
pub use module::NfcModule;

pub use core_nfc::{SessionState, StartOutcome};
pub use core_runtime::config::{NfcBridgeConfig, ReentrantStartPolicy};
pub use core_runtime::events::{NfcEvent, ScanStatus, StatusChange, TagDiscovered};

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use std::sync::Arc;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use bridge_desktop::TracingEventEmitter;

/// Convenience bootstrapper for desktop hosts.
///
/// Uses the virtual adapter and the desktop foreground context, and writes
/// host events to the tracing pipeline.
///
/// ```
/// # fn example() -> core_service::Result<()> {
/// let module = core_service::bootstrap_desktop()?;
/// assert_eq!(module.name(), "TurboNfc");
/// # Ok(())
/// # }
/// ```
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub fn bootstrap_desktop() -> Result<NfcModule> {
    let config = NfcBridgeConfig::builder()
        .event_emitter(Arc::new(TracingEventEmitter::new()))
        .build()?;
    NfcModule::new(config)
}
