//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the NFC bridge:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the NFC core and the host
//! façade depend on. It establishes the logging conventions, the fail-fast
//! configuration builder, and the event broadcasting mechanism that carries
//! tag discoveries from the platform callback to listeners.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
