//! Rolling-hash proximity authentication.
//!
//! A peer advertises short tokens, each derived from the previous one, the
//! shared secret digest and the current minute. The verifier predicts the
//! successor of whatever it last saw and authenticates once a nearby
//! broadcast matches that prediction.

pub mod types;
pub mod utils;
pub mod config;

pub mod token;
pub mod secret;
pub mod auth;
pub mod machine;
pub mod beacon;

// re-exports
pub use types::{AuthitError, Rssi};
pub use utils::{Epoch, EpochClock, FixedClock, SystemClock};
pub use config::ProtocolConfig;
pub use token::{Token, TokenLength};
pub use secret::SecretDigest;
pub use auth::TokenDeriver;
pub use machine::{AuthState, AuthStateMachine, ProtocolState, Transition};
pub use beacon::Beacon;
