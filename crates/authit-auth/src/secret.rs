use std::fmt;

use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::types::{AuthitError, SECRET_DIGEST_LEN};

/// SHA-512 digest of the user secret, in lowercase hex.
///
/// This is the shared keying material of both peers. It is never printed:
/// `Debug` is redacted and the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretDigest(String);

impl SecretDigest {
    /// Hash a user supplied secret.
    pub fn from_password(password: &str) -> Self {
        let mut h = Sha512::new();
        h.update(password.as_bytes());
        Self(hex::encode(h.finalize()))
    }

    /// Accept an already computed digest, e.g. the persisted `HASH=` value.
    pub fn from_hex(digest: &str) -> Result<Self, AuthitError> {
        let digest = digest.trim();
        if digest.len() != SECRET_DIGEST_LEN {
            return Err(AuthitError::WrongSecretSize(digest.len()));
        }
        hex::decode(digest).map_err(|_| AuthitError::InvalidHexSecret)?;

        Ok(Self(digest.to_ascii_lowercase()))
    }

    /// Canonical string form, as mixed into the token preimage.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretDigest(<redacted>)")
    }
}

impl Drop for SecretDigest {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
