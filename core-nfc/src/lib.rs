//! # NFC Session Module
//!
//! Foreground NFC tag reading on top of the platform bridge traits.
//!
//! ## Overview
//!
//! Three cooperating components share one [`NfcContext`]:
//!
//! - [`CapabilityProbe`] answers whether NFC is present and switched on
//! - [`SessionController`] starts and stops foreground dispatch
//! - [`EventRelay`] turns platform tag interrupts into `onTagDiscovered`
//!   events, flagging the configured info page tag
//!
//! All mutable state sits behind a single lock in the context, so calls from
//! the host and callbacks from the platform observe consistent state. Events
//! are published on the context's [`EventBus`](core_runtime::events::EventBus).

pub mod codec;
pub mod context;
pub mod error;
pub mod probe;
pub mod relay;
pub mod session;
pub mod tag;

#[cfg(test)]
mod testing;

pub use codec::{decode_tag_id, encode_tag_id};
pub use context::{NfcContext, SessionState};
pub use error::{NfcError, Result};
pub use probe::CapabilityProbe;
pub use relay::EventRelay;
pub use session::{SessionController, StartOutcome};
pub use tag::extract_tag;
