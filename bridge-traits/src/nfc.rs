//! NFC Hardware Abstraction
//!
//! Contracts for the platform NFC stack: the hardware adapter handle, the
//! provider that hands it out, and the intent payload delivered when a tag
//! enters the field.

use std::any::Any;
use std::sync::Arc;

use crate::{error::Result, foreground::ActivityHandle, platform::PlatformSendSync};

/// Intent extra key carrying the discovered tag.
pub const EXTRA_TAG: &str = "android.nfc.extra.TAG";

/// First platform SDK level exposing the typed parcelable extraction API.
pub const TYPED_EXTRACTION_MIN_SDK: u32 = 33;

/// A tag as handed over by the hardware layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// Identifier bytes (fixed length per tag technology, typically 4-10 bytes)
    pub id: Vec<u8>,
    /// Technologies the tag advertises (e.g. `android.nfc.tech.NfcA`)
    pub technologies: Vec<String>,
}

impl RawTag {
    pub fn new(id: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            technologies: Vec::new(),
        }
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technologies.push(technology.into());
        self
    }
}

/// NFC hardware adapter handle
///
/// Wraps the platform adapter object:
/// - **Android**: `android.nfc.NfcAdapter`
/// - **iOS**: `NFCTagReaderSession` availability (always enabled when present)
/// - **Desktop**: virtual adapter from `bridge-desktop`
///
/// Calls are expected to complete promptly; the core invokes them while
/// holding its session lock.
pub trait NfcAdapter: PlatformSendSync {
    /// Whether the user has NFC switched on
    fn is_enabled(&self) -> Result<bool>;

    /// Give `activity` priority over tag interrupts while it is in the foreground
    fn enable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()>;

    /// Withdraw a registration previously made for `activity`
    fn disable_foreground_dispatch(&self, activity: &ActivityHandle) -> Result<()>;
}

/// Source of the default adapter handle.
///
/// Returns `None` when the device has no NFC hardware. Absence is a normal
/// outcome, not an error.
pub trait NfcAdapterProvider: PlatformSendSync {
    fn default_adapter(&self) -> Option<Arc<dyn NfcAdapter>>;
}

/// Payload delivered with a tag-discovery interrupt.
///
/// Newer platform releases expose a type-checked accessor for the tag extra,
/// older ones only an untyped lookup. Implementations provide both and the
/// core picks one based on [`sdk_level`](DiscoveryIntent::sdk_level).
pub trait DiscoveryIntent: PlatformSendSync {
    /// Platform SDK level the intent was produced on
    fn sdk_level(&self) -> u32;

    /// Type-checked tag extraction
    fn typed_tag(&self) -> Option<RawTag>;

    /// Untyped extra lookup by key
    fn legacy_extra(&self, key: &str) -> Option<Box<dyn Any + Send>>;
}
