//! Peer side of the protocol: the token a device advertises, rolled forward
//! with the same deriver the verifier predicts with.

use crate::auth::TokenDeriver;
use crate::secret::SecretDigest;
use crate::token::{Token, TokenLength};
use crate::utils::{EpochClock, SystemClock};

pub struct Beacon<C = SystemClock> {
    secret: SecretDigest,
    clock: C,
    deriver: TokenDeriver,

    current: Token,
}

impl Beacon<SystemClock> {
    pub fn new(secret: SecretDigest, token_len: TokenLength) -> Self {
        Self::with_clock(secret, token_len, SystemClock)
    }
}

impl<C: EpochClock> Beacon<C> {
    /// The first token is derived from the leading characters of the secret
    /// digest itself.
    pub fn with_clock(secret: SecretDigest, token_len: TokenLength, clock: C) -> Self {
        let deriver = TokenDeriver::new(token_len);
        let seed = Token::new(&secret.as_hex()[..token_len.get()]);
        let current = deriver.derive(&seed, &secret, &clock.current_epoch());

        Self { secret, clock, deriver, current }
    }

    /// Token currently being advertised.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Replace the advertised token with its successor.
    pub fn roll(&mut self) -> &Token {
        let epoch = self.clock.current_epoch();
        self.current = self.deriver.derive(&self.current, &self.secret, &epoch);
        &self.current
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::{Epoch, FixedClock};

    fn beacon() -> Beacon<FixedClock> {
        Beacon::with_clock(
            SecretDigest::from_hex(&"deadbeef".repeat(16)).unwrap(),
            TokenLength::default(),
            FixedClock::new(Epoch::parse("2024-01-01 00:00").unwrap()),
        )
    }

    #[test]
    fn seed_derives_from_secret_prefix() {
        let secret = SecretDigest::from_hex(&"deadbeef".repeat(16)).unwrap();
        let epoch = Epoch::parse("2024-01-01 00:00").unwrap();
        let seed = TokenDeriver::default().derive(&Token::from("deadbeefdeadbeefdead"), &secret, &epoch);

        assert_eq!(beacon().current(), &seed);
    }

    #[test]
    fn roll_chains_tokens() {
        let mut b = beacon();
        let first = b.current().clone();
        let second = b.roll().clone();
        let third = b.roll().clone();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(second.len(), 20);
    }
}
