//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the NFC core and platform-specific
//! implementations. Each trait represents a capability that the core requires
//! but that must be implemented differently per platform (Android, iOS,
//! desktop).
//!
//! ## Traits
//!
//! ### NFC Hardware
//! - [`NfcAdapterProvider`](nfc::NfcAdapterProvider) - Hands out the default adapter handle, if the device has one
//! - [`NfcAdapter`](nfc::NfcAdapter) - Enabled query and foreground dispatch registration
//! - [`DiscoveryIntent`](nfc::DiscoveryIntent) - Payload delivered with a tag interrupt
//!
//! ### Platform Integration
//! - [`ForegroundContextProvider`](foreground::ForegroundContextProvider) - The activity currently in front of the user
//! - [`HostEventEmitter`](emitter::HostEventEmitter) - The host framework's event channel
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop` (virtual adapter) | ✅ Available |
//! | Android  | host-side adapter over `android.nfc` | 📋 Host provided |
//! | iOS      | host-side adapter over CoreNFC | 📋 Host provided |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should convert platform exceptions into
//! `BridgeError::OperationFailed` carrying the platform message, which the core
//! forwards to the caller unchanged.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds on native targets: tag
//! interrupts and application calls may arrive on different threads.
//!
//! ## Examples
//!
//! ### Implementing NfcAdapter
//!
//! ```ignore
//! use bridge_traits::foreground::ActivityHandle;
//! use bridge_traits::nfc::NfcAdapter;
//! use bridge_traits::error::Result;
//!
//! pub struct JniNfcAdapter {
//!     adapter: jni::objects::GlobalRef,
//! }
//!
//! impl NfcAdapter for JniNfcAdapter {
//!     fn is_enabled(&self) -> Result<bool> {
//!         // Call NfcAdapter.isEnabled()
//!         todo!()
//!     }
//!
//!     fn enable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()> {
//!         todo!()
//!     }
//!
//!     fn disable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()> {
//!         todo!()
//!     }
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod foreground;
pub mod logging;
pub mod nfc;
pub mod platform;

pub use error::BridgeError;

// Re-export commonly used types
pub use emitter::HostEventEmitter;
pub use foreground::{ActivityHandle, ForegroundContextProvider};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use nfc::{DiscoveryIntent, NfcAdapter, NfcAdapterProvider, RawTag};
