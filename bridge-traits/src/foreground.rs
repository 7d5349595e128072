//! Foreground UI Context
//!
//! Foreground dispatch can only be registered for the activity currently in
//! front of the user. The host reports which one that is.

use crate::platform::PlatformSendSync;

/// Opaque reference to a host UI context (Android `Activity`, iOS view
/// controller, desktop window).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityHandle(pub String);

impl ActivityHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Foreground context provider trait
///
/// # Platform Support
///
/// - **Android**: `ReactContext.currentActivity`
/// - **iOS**: key window root view controller
/// - **Desktop**: main window (always foreground)
pub trait ForegroundContextProvider: PlatformSendSync {
    /// The activity currently in the foreground, if any
    fn current_activity(&self) -> Option<ActivityHandle>;
}
