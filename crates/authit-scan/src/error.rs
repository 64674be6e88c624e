use authit_auth::AuthitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("transport is already scanning")]
    AlreadyScanning,
    #[error("failed to start scanning: {0}")]
    FailToStartScan(String),
    #[error("failed to stop scanning: {0}")]
    FailToStopScan(String),

    #[error("malformed advertisement record `{line}`: {reason}")]
    MalformedRecord { line: String, reason: &'static str },

    #[error(transparent)]
    Config(#[from] AuthitError),
}
