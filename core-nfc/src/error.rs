use thiserror::Error;

/// Named failures surfaced to the host as rejections.
///
/// Each variant maps to a stable code via [`NfcError::code`]; hosts branch on
/// the code, the `Display` text is for humans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NfcError {
    #[error("NFC is not supported on this device")]
    NotSupported,

    #[error("Activity is null")]
    ActivityNull,

    #[error("NFC adapter is not available")]
    NotAvailable,

    #[error("NFC is disabled")]
    Disabled,

    #[error("NFC tag reading is already active")]
    AlreadyReading,

    #[error("Failed to start NFC scanning: {0}")]
    StartFailed(String),

    #[error("Failed to stop NFC scanning: {0}")]
    StopFailed(String),
}

impl NfcError {
    /// Rejection code reported to the host.
    pub fn code(&self) -> &'static str {
        match self {
            NfcError::NotSupported => "nfc_not_supported",
            NfcError::ActivityNull => "activity_null",
            NfcError::NotAvailable => "nfc_not_available",
            NfcError::Disabled => "nfc_disabled",
            NfcError::AlreadyReading => "already_reading",
            NfcError::StartFailed(_) => "nfc_error",
            NfcError::StopFailed(_) => "stop_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, NfcError>;
