use std::io::Write;
use std::process::ExitCode;

use thiserror::Error;

use authit_auth::config::env_parse;
use authit_auth::{AuthitError, Beacon, ProtocolConfig, Rssi};
use authit_scan::types::ROLL_INTERVAL;
use authit_scan::{format_record, AUTH_SERVICE_UUID_FULL};
use authit_storage::SecretStoreError;

const ENV_BEACON_RSSI: &str = "AUTHIT_BEACON_RSSI";
const DEFAULT_BEACON_RSSI: Rssi = -60;

#[derive(Debug, Error)]
enum BeaconError {
    #[error(transparent)]
    Secret(#[from] SecretStoreError),
    #[error(transparent)]
    Config(#[from] AuthitError),
}

async fn run() -> Result<(), BeaconError> {
    let secret = authit_storage::load_or_prompt()?;
    let config = ProtocolConfig::from_env()?;
    let rssi = env_parse::<Rssi>(ENV_BEACON_RSSI)?.unwrap_or(DEFAULT_BEACON_RSSI);

    let mut beacon = Beacon::new(secret, config.token_len);
    let mut ticker = tokio::time::interval(ROLL_INTERVAL);
    let mut stdout = std::io::stdout();

    loop {
        ticker.tick().await;
        let record = format_record(AUTH_SERVICE_UUID_FULL, rssi, beacon.current().as_bytes());
        if writeln!(stdout, "{}", record).and_then(|_| stdout.flush()).is_err() {
            // reader went away
            log::debug!("stdout closed, stopping beacon");
            return Ok(());
        }
        log::trace!("advertised {}", beacon.current());
        beacon.roll();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
