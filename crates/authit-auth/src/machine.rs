//! Verifier side of the rolling-hash protocol.
//!
//! Every broadcast that does not match the current prediction becomes the
//! seed of the next one, so a peer that rolls its token with the same secret
//! is recognised on the broadcast following the first one we observe.

use crate::auth::TokenDeriver;
use crate::config::ProtocolConfig;
use crate::secret::SecretDigest;
use crate::token::Token;
use crate::types::Rssi;
use crate::utils::{EpochClock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Waiting,
    Authenticated,
}

/// What a single broadcast did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Payload could not be decoded into a token; nothing changed.
    Ignored,
    /// Same token as the previous broadcast.
    Duplicate,
    /// No match; the prediction now derives from this broadcast.
    Advanced { in_range: bool },
    Authenticated,
    /// The machine was already terminal.
    AlreadyAuthenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolState {
    last_seen_token: Option<Token>,
    pending_prediction: Option<Token>,
    authenticated: bool,
}

impl ProtocolState {
    pub fn last_seen_token(&self) -> Option<&Token> {
        self.last_seen_token.as_ref()
    }

    pub fn pending_prediction(&self) -> Option<&Token> {
        self.pending_prediction.as_ref()
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }
}

pub struct AuthStateMachine<C = SystemClock> {
    secret: SecretDigest,
    clock: C,
    deriver: TokenDeriver,
    rssi_threshold: Rssi,

    state: ProtocolState,
    rejected_payloads: u64,
}

impl AuthStateMachine<SystemClock> {
    pub fn new(secret: SecretDigest, config: ProtocolConfig) -> Self {
        Self::with_clock(secret, config, SystemClock)
    }
}

impl<C: EpochClock> AuthStateMachine<C> {
    pub fn with_clock(secret: SecretDigest, config: ProtocolConfig, clock: C) -> Self {
        Self {
            secret,
            clock,
            deriver: TokenDeriver::new(config.token_len),
            rssi_threshold: config.rssi_threshold,
            state: ProtocolState::default(),
            rejected_payloads: 0,
        }
    }

    /// Feed one observed broadcast. Never fails: malformed payloads are
    /// dropped and only counted.
    pub fn on_broadcast(&mut self, raw: &[u8], rssi: Rssi) -> Transition {
        if self.state.authenticated {
            return Transition::AlreadyAuthenticated;
        }

        let candidate = match Token::decode_lossy(raw) {
            Ok(token) => token,
            Err(e) => {
                self.rejected_payloads = self.rejected_payloads.saturating_add(1);
                log::trace!("dropping broadcast: {}", e);
                return Transition::Ignored;
            }
        };

        if self.state.last_seen_token.as_ref() == Some(&candidate) {
            return Transition::Duplicate;
        }
        self.state.last_seen_token = Some(candidate.clone());

        let in_range = rssi >= self.rssi_threshold;
        if in_range && self.state.pending_prediction.as_ref() == Some(&candidate) {
            self.state.authenticated = true;
            log::info!("received valid token {} at {} dBm", candidate, rssi);
            return Transition::Authenticated;
        }

        let epoch = self.clock.current_epoch();
        let prediction = self.deriver.derive(&candidate, &self.secret, &epoch);
        log::debug!(
            "token {} at {} dBm (in range: {}), next prediction {}",
            candidate, rssi, in_range, prediction
        );
        self.state.pending_prediction = Some(prediction);

        Transition::Advanced { in_range }
    }

    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    pub fn auth_state(&self) -> AuthState {
        if self.state.authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Waiting
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Broadcasts dropped because their payload did not decode.
    pub fn rejected_payloads(&self) -> u64 {
        self.rejected_payloads
    }
}
