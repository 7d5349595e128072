use core_nfc::NfcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Rejection handed to the host when a module operation fails.
///
/// `code` is stable and meant for branching; `message` is for humans.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ModuleRejection {
    pub code: String,
    pub message: String,
}

impl ModuleRejection {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<NfcError> for ModuleRejection {
    fn from(err: NfcError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_from_nfc_error() {
        let rejection = ModuleRejection::from(NfcError::Disabled);
        assert_eq!(rejection.code, "nfc_disabled");
        assert_eq!(rejection.message, "NFC is disabled");
    }

    #[test]
    fn test_rejection_keeps_platform_message() {
        let rejection = ModuleRejection::from(NfcError::StopFailed("activity destroyed".into()));
        assert_eq!(rejection.code, "stop_error");
        assert!(rejection.message.ends_with("activity destroyed"));
    }

    #[test]
    fn test_rejection_serializes_flat() {
        let value = serde_json::to_value(ModuleRejection::from(NfcError::NotSupported)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "nfc_not_supported",
                "message": "NFC is not supported on this device"
            })
        );
    }
}
