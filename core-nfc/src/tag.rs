//! Tag extraction from discovery intents.

use bridge_traits::nfc::{DiscoveryIntent, RawTag, EXTRA_TAG, TYPED_EXTRACTION_MIN_SDK};
use tracing::warn;

/// Pull the discovered tag out of `intent`.
///
/// Uses the typed accessor on platforms that have it and the untyped extra
/// with a checked downcast elsewhere. `None` means the intent carried no tag.
pub fn extract_tag(intent: &dyn DiscoveryIntent) -> Option<RawTag> {
    if intent.sdk_level() >= TYPED_EXTRACTION_MIN_SDK {
        return intent.typed_tag();
    }

    let extra = intent.legacy_extra(EXTRA_TAG)?;
    match extra.downcast::<RawTag>() {
        Ok(tag) => Some(*tag),
        Err(_) => {
            warn!(key = EXTRA_TAG, "Intent extra is not a tag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::VirtualTagIntent;
    use std::any::Any;

    /// Intent whose two accessors disagree, to observe which path was taken.
    struct SplitIntent {
        sdk_level: u32,
    }

    impl DiscoveryIntent for SplitIntent {
        fn sdk_level(&self) -> u32 {
            self.sdk_level
        }

        fn typed_tag(&self) -> Option<RawTag> {
            Some(RawTag::new(vec![0x01]))
        }

        fn legacy_extra(&self, key: &str) -> Option<Box<dyn Any + Send>> {
            assert_eq!(key, EXTRA_TAG);
            Some(Box::new(RawTag::new(vec![0x02])))
        }
    }

    struct WrongTypeIntent;

    impl DiscoveryIntent for WrongTypeIntent {
        fn sdk_level(&self) -> u32 {
            28
        }

        fn typed_tag(&self) -> Option<RawTag> {
            None
        }

        fn legacy_extra(&self, _key: &str) -> Option<Box<dyn Any + Send>> {
            Some(Box::new("not a tag".to_string()))
        }
    }

    #[test]
    fn test_path_selected_by_sdk_level() {
        let typed = extract_tag(&SplitIntent { sdk_level: 33 }).unwrap();
        let legacy = extract_tag(&SplitIntent { sdk_level: 32 }).unwrap();

        assert_eq!(typed.id, vec![0x01]);
        assert_eq!(legacy.id, vec![0x02]);
    }

    #[test]
    fn test_both_paths_yield_same_bytes() {
        let tag = RawTag::new(vec![0x04, 0xA3, 0xF2, 0x1B]).with_technology("android.nfc.tech.NfcA");

        let typed = extract_tag(&VirtualTagIntent::new(34, tag.clone()));
        let legacy = extract_tag(&VirtualTagIntent::new(29, tag.clone()));

        assert_eq!(typed, Some(tag.clone()));
        assert_eq!(legacy, Some(tag));
    }

    #[test]
    fn test_intent_without_tag() {
        assert!(extract_tag(&VirtualTagIntent::empty(34)).is_none());
        assert!(extract_tag(&VirtualTagIntent::empty(26)).is_none());
    }

    #[test]
    fn test_mistyped_legacy_extra() {
        assert!(extract_tag(&WrongTypeIntent).is_none());
    }
}
