//! Test helpers.

use std::sync::{Arc, Mutex};

use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

use crate::context::NfcContext;

/// Layer recording, for every log event, whether the session lock was held
/// while it was emitted.
struct LockWatch {
    context: Arc<NfcContext>,
    held: Arc<Mutex<Vec<bool>>>,
}

impl<S: Subscriber> Layer<S> for LockWatch {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        let held = self.context.is_locked();
        self.held.lock().unwrap().push(held);
    }
}

/// Run `f` with a subscriber attached and return the lock state observed at
/// each log event.
pub(crate) fn lock_state_per_event(context: &Arc<NfcContext>, f: impl FnOnce()) -> Vec<bool> {
    let held = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(LockWatch {
        context: Arc::clone(context),
        held: Arc::clone(&held),
    });

    tracing::subscriber::with_default(subscriber, f);

    let observed = held.lock().unwrap().clone();
    observed
}
