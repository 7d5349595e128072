//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! Desktops rarely ship an NFC controller the host framework can reach, so
//! this crate provides a virtual stack that behaves like the mobile one:
//! - `NfcAdapterProvider` / `NfcAdapter` backed by [`VirtualNfcAdapter`],
//!   with toggles for hardware presence, the enabled switch and injected
//!   platform failures
//! - `DiscoveryIntent` via [`VirtualTagIntent`] for simulating tag taps on
//!   either extraction path
//! - `ForegroundContextProvider` as a single main window that is foreground
//!   unless told otherwise
//! - `HostEventEmitter` implementations that log events or hand them to a
//!   channel consumed by the desktop shell
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopForegroundContext, VirtualAdapterProvider, VirtualNfcAdapter};
//! use std::sync::Arc;
//!
//! let adapter = Arc::new(VirtualNfcAdapter::new(true));
//! let provider = VirtualAdapterProvider::with_adapter(Arc::clone(&adapter));
//! let foreground = DesktopForegroundContext::new();
//!
//! // Use in NfcBridgeConfig
//! ```

mod emitter;
mod foreground;
mod nfc;

pub use emitter::{ChannelEventEmitter, TracingEventEmitter};
pub use foreground::DesktopForegroundContext;
pub use nfc::{VirtualAdapterProvider, VirtualNfcAdapter, VirtualTagIntent};
