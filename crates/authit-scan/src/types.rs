use std::time::Duration;

use authit_auth::Rssi;

/// 16-bit service uuid the peer advertises its token under.
pub const AUTH_SERVICE_UUID: &str = "fff0";
/// Full 128-bit form of `AUTH_SERVICE_UUID`.
pub const AUTH_SERVICE_UUID_FULL: &str = "0000fff0-0000-1000-8000-00805f9b34fb";

pub const SCAN_TIMEOUT: Duration = Duration::from_secs(10);
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
/// How often a beacon replaces its advertised token.
pub const ROLL_INTERVAL: Duration = Duration::from_millis(200);

/// One received advertisement: service data keyed by service uuid, plus the
/// signal strength it was received at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub service_data: Vec<(String, Vec<u8>)>,
    pub rssi: Rssi,
}

impl Advertisement {
    pub fn new(service_uuid: impl Into<String>, payload: impl Into<Vec<u8>>, rssi: Rssi) -> Self {
        Self {
            service_data: vec![(service_uuid.into(), payload.into())],
            rssi,
        }
    }

    /// Payloads advertised under a uuid containing `service_uuid`.
    ///
    /// `service_uuid` is expected in lowercase.
    pub fn payloads_for<'a>(&'a self, service_uuid: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.service_data
            .iter()
            .filter(move |(uuid, _)| uuid.to_ascii_lowercase().contains(service_uuid))
            .map(|(_, data)| data.as_slice())
    }
}

/// How a scan session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Authenticated,
    TimedOut,
}
