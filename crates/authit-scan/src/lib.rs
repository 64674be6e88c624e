//! Scan session around the Auth-It verifier.
//!
//! A [`ScanTransport`] produces advertisements, the session's event loop
//! feeds those carrying the Auth-It service uuid into an
//! [`authit_auth::AuthStateMachine`] and a concurrent wait loop reports
//! [`SessionOutcome::Authenticated`] or [`SessionOutcome::TimedOut`].

pub mod error;
pub mod types;
pub mod config;
pub mod transport;
pub mod record;
pub mod session;

// re-exports
pub use error::ScanError;
pub use types::{Advertisement, SessionOutcome, AUTH_SERVICE_UUID, AUTH_SERVICE_UUID_FULL};
pub use config::ScanConfig;
pub use transport::{AdvertisementSender, AdvertisementStream, ChannelTransport, ScanTransport};
pub use record::{format_record, parse_record, spawn_record_reader};
pub use session::{ScanEventLoop, ScanSession};
