//! Foreground Context Implementation

use bridge_traits::foreground::{ActivityHandle, ForegroundContextProvider};
use std::sync::Mutex;

/// Identifier reported for the desktop main window.
const MAIN_WINDOW: &str = "desktop-main-window";

/// Desktop foreground context.
///
/// Desktop hosts have a single main window that is considered foreground
/// unless it has been minimised.
pub struct DesktopForegroundContext {
    activity: Mutex<Option<ActivityHandle>>,
}

impl DesktopForegroundContext {
    /// Create a context whose main window is in the foreground.
    pub fn new() -> Self {
        Self {
            activity: Mutex::new(Some(ActivityHandle::new(MAIN_WINDOW))),
        }
    }

    /// Replace the foreground activity.
    pub fn set_activity(&self, activity: Option<ActivityHandle>) {
        *self
            .activity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = activity;
    }
}

impl Default for DesktopForegroundContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundContextProvider for DesktopForegroundContext {
    fn current_activity(&self) -> Option<ActivityHandle> {
        self.activity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_window_is_foreground() {
        let context = DesktopForegroundContext::new();
        assert_eq!(
            context.current_activity(),
            Some(ActivityHandle::new(MAIN_WINDOW))
        );
    }

    #[test]
    fn test_minimised_window() {
        let context = DesktopForegroundContext::new();
        context.set_activity(None);
        assert!(context.current_activity().is_none());
    }
}
