use std::fmt;

use crate::types::{AuthitError, HASH_PADDING_LENGTH, MAX_TOKEN_LENGTH, PREDICTION_LENGTH};

/// A short printable token exchanged over the broadcast channel.
///
/// Two tokens are equal iff their string forms are byte-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Decode a raw service-data payload.
    ///
    /// Invalid UTF-8 sequences are dropped rather than replaced. An empty
    /// payload is the (valid) empty token, while a non-empty payload with no
    /// valid text left is rejected.
    pub fn decode_lossy(raw: &[u8]) -> Result<Self, AuthitError> {
        let decoded: String = raw
            .utf8_chunks()
            .map(|chunk| chunk.valid())
            .collect();

        if decoded.is_empty() && !raw.is_empty() {
            return Err(AuthitError::EmptyDecode);
        }

        let len = decoded.chars().count();
        if len > HASH_PADDING_LENGTH {
            return Err(AuthitError::OversizedToken(len));
        }

        Ok(Self(decoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Number of digest hex characters kept in a derived token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLength(usize);

impl TokenLength {
    pub fn new(len: usize) -> Result<Self, AuthitError> {
        if len == 0 || len > MAX_TOKEN_LENGTH {
            return Err(AuthitError::InvalidTokenLength(len));
        }
        Ok(Self(len))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TokenLength {
    fn default() -> Self {
        Self(PREDICTION_LENGTH)
    }
}

impl TryFrom<usize> for TokenLength {
    type Error = AuthitError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
