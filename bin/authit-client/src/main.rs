use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use thiserror::Error;

use authit_auth::AuthitError;
use authit_scan::{
    spawn_record_reader, AdvertisementSender, ChannelTransport, ScanConfig, ScanError, ScanSession,
    SessionOutcome,
};
use authit_storage::SecretStoreError;

#[derive(Debug, Error)]
enum ClientError {
    #[error(transparent)]
    Secret(#[from] SecretStoreError),
    #[error(transparent)]
    Config(#[from] AuthitError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot open advertisement records {path}: {source}")]
    Records { path: String, source: std::io::Error },
}

/// Advertisement records come from the file named by the first argument, or
/// stdin when it is absent or `-`. The reader thread is left detached.
fn read_records(sender: AdvertisementSender) -> Result<(), ClientError> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            let file = File::open(&path).map_err(|source| ClientError::Records { path, source })?;
            spawn_record_reader(BufReader::new(file), sender);
        }
        _ => {
            spawn_record_reader(BufReader::new(std::io::stdin()), sender);
        }
    }
    Ok(())
}

async fn run() -> Result<SessionOutcome, ClientError> {
    // provisioning failures are fatal before any scanning starts
    let secret = authit_storage::load_or_prompt()?;
    let config = ScanConfig::from_env()?;

    let (transport, sender) = ChannelTransport::new();
    read_records(sender)?;
    let outcome = ScanSession::new(transport, secret, config).run().await?;
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    match run().await {
        Ok(SessionOutcome::Authenticated) => {
            log::info!("Authentication completed.");
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::TimedOut) => {
            log::error!("Timeout: no valid Auth-It devices found.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
