//! Session controller.
//!
//! Two states, `Idle` and `Reading`. `start` validates the preconditions in a
//! fixed order, registers foreground dispatch and only then flips to
//! `Reading`; `stop` is idempotent.

use std::sync::Arc;

use bridge_traits::{error::BridgeError, foreground::ActivityHandle};
use core_runtime::{
    config::ReentrantStartPolicy,
    events::{NfcEvent, ScanStatus, StatusChange},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::context::{NfcContext, SessionInner, SessionState};
use crate::error::{NfcError, Result};

const STARTED_MESSAGE: &str = "NFC scanning started";

/// Result handed back by a successful `start`.
///
/// Only says that scanning is active; tag data arrives through events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl StartOutcome {
    fn started() -> Self {
        Self {
            success: true,
            message: Some(STARTED_MESSAGE.to_string()),
            payload: None,
        }
    }
}

pub struct SessionController {
    context: Arc<NfcContext>,
}

impl SessionController {
    pub fn new(context: Arc<NfcContext>) -> Self {
        Self { context }
    }

    /// Begin foreground scanning.
    ///
    /// # Errors
    ///
    /// Checked in order: `ActivityNull`, `NotAvailable`, `Disabled`. A failing
    /// platform call yields `StartFailed`. Calling while already reading
    /// yields `AlreadyReading` under [`ReentrantStartPolicy::Reject`].
    #[instrument(skip(self))]
    pub fn start(&self) -> Result<StartOutcome> {
        let mut inner = self.context.lock();

        let mut previous = match inner.state.clone() {
            SessionState::Idle => None,
            SessionState::Reading {
                session_id,
                activity,
            } => match self.context.reentrant_start() {
                ReentrantStartPolicy::Reject => {
                    drop(inner);
                    warn!(%session_id, "Tag reading already active");
                    return Err(NfcError::AlreadyReading);
                }
                ReentrantStartPolicy::Reregister => Some(activity),
            },
        };
        let reregistering = previous.is_some();
        let mut release_failures = Vec::new();

        let outcome = match self.register(&mut inner, &mut previous, &mut release_failures) {
            Ok(activity) => {
                let session_id = Uuid::new_v4();
                inner.state = SessionState::Reading {
                    session_id,
                    activity: activity.clone(),
                };
                let subscribers = self
                    .context
                    .publish(NfcEvent::StatusChange(StatusChange::new(ScanStatus::Active)));
                Ok((session_id, activity, subscribers))
            }
            Err(err) => {
                inner.state = SessionState::Idle;
                if reregistering {
                    // The old registration must not outlive the session.
                    release_failures.extend(Self::release(&inner, previous));
                    self.context
                        .publish(NfcEvent::StatusChange(StatusChange::new(ScanStatus::Stopped)));
                }
                Err(err)
            }
        };
        drop(inner);

        for (activity, e) in release_failures {
            warn!(error = %e, activity = activity.id(), "Failed to release previous dispatch");
        }

        match outcome {
            Ok((session_id, activity, subscribers)) => {
                info!(
                    %session_id,
                    activity = activity.id(),
                    reregistered = reregistering,
                    subscribers,
                    "NFC scanning started"
                );
                Ok(StartOutcome::started())
            }
            Err(err) => {
                match &err {
                    NfcError::StartFailed(_) => error!(error = %err, "Failed to start NFC scanning"),
                    _ => warn!(code = err.code(), "NFC scanning not started"),
                }
                if reregistering {
                    info!("NFC scanning stopped after failed re-registration");
                }
                Err(err)
            }
        }
    }

    /// Unregister `activity`, handing back the platform error instead of
    /// logging it.
    fn release(
        inner: &SessionInner,
        activity: Option<ActivityHandle>,
    ) -> Option<(ActivityHandle, BridgeError)> {
        let (Some(activity), Some(adapter)) = (activity, inner.adapter.as_ref()) else {
            return None;
        };
        adapter
            .disable_foreground_dispatch(&activity)
            .err()
            .map(|e| (activity, e))
    }

    fn register(
        &self,
        inner: &mut SessionInner,
        previous: &mut Option<ActivityHandle>,
        release_failures: &mut Vec<(ActivityHandle, BridgeError)>,
    ) -> Result<ActivityHandle> {
        let activity = self
            .context
            .current_activity()
            .ok_or(NfcError::ActivityNull)?;

        let adapter = self
            .context
            .acquire_adapter(inner)
            .ok_or(NfcError::NotAvailable)?;

        let enabled = adapter
            .is_enabled()
            .map_err(|e| NfcError::StartFailed(e.to_string()))?;
        if !enabled {
            return Err(NfcError::Disabled);
        }

        if previous.as_ref().is_some_and(|previous| *previous != activity) {
            release_failures.extend(Self::release(inner, previous.take()));
        }

        adapter
            .enable_foreground_dispatch(&activity)
            .map_err(|e| NfcError::StartFailed(e.to_string()))?;

        Ok(activity)
    }

    /// Stop scanning. Succeeds trivially when already idle.
    ///
    /// # Errors
    ///
    /// `StopFailed` when the platform refuses to unregister. The session is
    /// considered stopped either way.
    #[instrument(skip(self))]
    pub fn stop(&self) -> Result<bool> {
        let mut inner = self.context.lock();

        let SessionState::Reading {
            session_id,
            activity,
        } = std::mem::take(&mut inner.state)
        else {
            drop(inner);
            debug!("Tag reading already stopped");
            return Ok(true);
        };

        let released = match inner.adapter.clone() {
            Some(adapter) => adapter.disable_foreground_dispatch(&activity),
            None => Ok(()),
        };
        let subscribers = released.is_ok().then(|| {
            self.context
                .publish(NfcEvent::StatusChange(StatusChange::new(ScanStatus::Stopped)))
        });
        drop(inner);

        if let Err(e) = released {
            error!(error = %e, %session_id, "Error in disableForegroundDispatch");
            return Err(NfcError::StopFailed(e.to_string()));
        }
        info!(%session_id, subscribers, "NFC scanning stopped");
        Ok(true)
    }

    /// Store the info page tag id verbatim. Available in any state.
    pub fn set_reference_tag_id(&self, tag_id: impl Into<String>) {
        let tag_id = tag_id.into();
        debug!(tag_id = %tag_id, "Info page tag id set");
        self.context.lock().reference_tag_id = Some(tag_id);
    }

    pub fn reference_tag_id(&self) -> Option<String> {
        self.context.lock().reference_tag_id.clone()
    }

    pub fn state(&self) -> SessionState {
        self.context.lock().state.clone()
    }

    pub fn is_reading(&self) -> bool {
        self.context.lock().state.is_reading()
    }
}
