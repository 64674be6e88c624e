//! The rolling-hash step shared by the verifier and the beacon.

use sha2::{Digest, Sha512};

use crate::secret::SecretDigest;
use crate::token::{Token, TokenLength};
use crate::types::{HASH_PADDING_CHAR, HASH_PADDING_LENGTH};
use crate::utils::Epoch;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenDeriver {
    token_len: TokenLength,
}

impl TokenDeriver {
    pub fn new(token_len: TokenLength) -> Self {
        Self { token_len }
    }

    /// `sha512(pad(input) || secret || epoch)`, hex encoded and truncated.
    pub fn derive(&self, input: &Token, secret: &SecretDigest, epoch: &Epoch) -> Token {
        let digest = Sha512::digest(Self::preimage(input, secret, epoch).as_bytes());
        let mut out = hex::encode(digest);
        out.truncate(self.token_len.get());

        Token::new(out)
    }

    /// The input token right-padded to the fixed block length. Inputs already
    /// at or above the block length are left untouched.
    pub fn pad(input: &Token) -> String {
        let len = input.as_str().chars().count();
        let mut padded = String::with_capacity(HASH_PADDING_LENGTH.max(input.len()));
        padded.push_str(input.as_str());
        padded.extend(std::iter::repeat(HASH_PADDING_CHAR).take(HASH_PADDING_LENGTH.saturating_sub(len)));
        padded
    }

    pub fn preimage(input: &Token, secret: &SecretDigest, epoch: &Epoch) -> String {
        let mut preimage = Self::pad(input);
        preimage.push_str(secret.as_hex());
        preimage.push_str(epoch.as_str());
        preimage
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn secret() -> SecretDigest {
        SecretDigest::from_hex(&"deadbeef".repeat(16)).unwrap()
    }

    fn epoch() -> Epoch {
        Epoch::parse("2024-01-01 00:00").unwrap()
    }

    #[test]
    fn derive_is_deterministic() {
        let deriver = TokenDeriver::default();
        let token = Token::from("ABCDEF0123456789ABCD");

        let a = deriver.derive(&token, &secret(), &epoch());
        let b = deriver.derive(&token, &secret(), &epoch());
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn derive_matches_manual_digest() {
        let token = Token::from("ABCDEF0123456789ABCD");
        let payload = format!(
            "{}{}{}{}",
            "ABCDEF0123456789ABCD",
            "0".repeat(108),
            "deadbeef".repeat(16),
            "2024-01-01 00:00"
        );
        let expected = hex::encode(Sha512::digest(payload.as_bytes()));

        let derived = TokenDeriver::default().derive(&token, &secret(), &epoch());
        assert_eq!(derived.as_str(), &expected[..20]);
    }

    #[test]
    fn padding_is_constant_length() {
        let long = "f".repeat(HASH_PADDING_LENGTH);
        for input in ["", "a", "ABCDEF0123456789ABCD", long.as_str()] {
            assert_eq!(TokenDeriver::pad(&Token::from(input)).len(), HASH_PADDING_LENGTH);
        }
        assert_eq!(TokenDeriver::pad(&Token::from("ab")), format!("ab{}", "0".repeat(126)));
    }

    #[test]
    fn same_length_inputs_do_not_collide() {
        let deriver = TokenDeriver::default();
        let a = deriver.derive(&Token::from("ABCDEF0123456789ABCD"), &secret(), &epoch());
        let b = deriver.derive(&Token::from("ABCDEF0123456789ABCE"), &secret(), &epoch());
        assert_ne!(a, b);
    }

    #[test]
    fn epoch_and_secret_change_the_token() {
        let deriver = TokenDeriver::default();
        let token = Token::from("ABCDEF0123456789ABCD");
        let base = deriver.derive(&token, &secret(), &epoch());

        let later = Epoch::parse("2024-01-01 00:01").unwrap();
        assert_ne!(base, deriver.derive(&token, &secret(), &later));

        let other = SecretDigest::from_password("hunter2");
        assert_ne!(base, deriver.derive(&token, &other, &epoch()));
    }

    #[test]
    fn token_length_is_configurable() {
        let deriver = TokenDeriver::new(TokenLength::new(26).unwrap());
        let long = deriver.derive(&Token::from("x"), &secret(), &epoch());
        let short = TokenDeriver::default().derive(&Token::from("x"), &secret(), &epoch());
        assert_eq!(long.len(), 26);
        assert!(long.as_str().starts_with(short.as_str()));
    }
}
