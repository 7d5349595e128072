//! Tag interrupt relay.
//!
//! Turns a discovery intent into an `onTagDiscovered` event. Runs on the
//! platform's thread, so it shares the session lock with the controller.

use std::sync::Arc;

use bridge_traits::nfc::DiscoveryIntent;
use core_runtime::events::{NfcEvent, TagDiscovered};
use tracing::{debug, info, instrument};

use crate::codec::encode_tag_id;
use crate::context::NfcContext;
use crate::tag::extract_tag;

pub struct EventRelay {
    context: Arc<NfcContext>,
}

impl EventRelay {
    pub fn new(context: Arc<NfcContext>) -> Self {
        Self { context }
    }

    /// Handle a new intent delivered by the platform.
    ///
    /// Returns the published payload, or `None` when the intent carried no
    /// tag. Events are not gated on the session state and repeated reads of
    /// one tag are all reported.
    #[instrument(skip(self, intent), fields(sdk_level = intent.sdk_level()))]
    pub fn on_new_intent(&self, intent: &dyn DiscoveryIntent) -> Option<TagDiscovered> {
        let Some(tag) = extract_tag(intent) else {
            debug!("Intent carried no tag");
            return None;
        };

        let tag_id = encode_tag_id(&tag.id);

        // Held only while publishing so events leave in interrupt order.
        let inner = self.context.lock();
        let is_info_page_tag = inner
            .reference_tag_id
            .as_deref()
            .is_some_and(|reference| reference == tag_id);

        let discovered = TagDiscovered::new(tag_id, is_info_page_tag);
        self.context
            .publish(NfcEvent::TagDiscovered(discovered.clone()));
        drop(inner);

        info!(
            tag_id = %discovered.tag_id,
            is_info_page_tag,
            technologies = ?tag.technologies,
            "NFC tag discovered"
        );

        Some(discovered)
    }
}
