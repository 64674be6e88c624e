use thiserror::Error;

/// Length of the block a received token is right-padded to before digesting.
pub const HASH_PADDING_LENGTH: usize = 128;
/// Filler used to pad a received token up to `HASH_PADDING_LENGTH`.
pub const HASH_PADDING_CHAR: char = '0';

/// Number of hex characters kept from the digest. Can go up to
/// `MAX_TOKEN_LENGTH` but some Android advertisers drop longer payloads.
pub const PREDICTION_LENGTH: usize = 20;
/// Service data capacity of a legacy BLE advertisement for a 16-bit uuid.
pub const MAX_TOKEN_LENGTH: usize = 26;

/// Weakest signal strength still considered "close enough".
pub const RSSI_THRESHOLD: Rssi = -87;

/// Hex length of a SHA-512 digest.
pub const SECRET_DIGEST_LEN: usize = 128;

/// `chrono` format of an epoch: UTC, minute resolution.
pub const EPOCH_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Signal strength in dBm, more negative is weaker.
pub type Rssi = i16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthitError {
    #[error("secret digest must be {} hex characters, got {0} characters", SECRET_DIGEST_LEN)]
    WrongSecretSize(usize),
    #[error("secret digest is not valid hex")]
    InvalidHexSecret,

    #[error("token length {0} is outside 1..={}", MAX_TOKEN_LENGTH)]
    InvalidTokenLength(usize),
    #[error("epoch `{0}` is not formatted as YYYY-MM-DD HH:MM")]
    InvalidEpoch(String),

    #[error("payload decoded to no usable text")]
    EmptyDecode,
    #[error("decoded token of {0} characters exceeds the padding block")]
    OversizedToken(usize),

    #[error("environment variable {name} has invalid value `{value}`")]
    InvalidEnvVar { name: &'static str, value: String },
}
