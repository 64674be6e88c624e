use std::time::Duration;

use authit_auth::{
    AuthStateMachine, Beacon, Epoch, FixedClock, ProtocolConfig, SecretDigest, TokenLength,
};
use authit_scan::{
    format_record, spawn_record_reader, Advertisement, ChannelTransport, ScanConfig, ScanSession,
    SessionOutcome, AUTH_SERVICE_UUID_FULL,
};

fn secret() -> SecretDigest {
    SecretDigest::from_hex(&"deadbeef".repeat(16)).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(Epoch::parse("2024-01-01 00:00").unwrap())
}

fn session_config() -> ScanConfig {
    ScanConfig::default().with_timeout(Duration::from_secs(10))
}

fn verifier() -> AuthStateMachine<FixedClock> {
    AuthStateMachine::with_clock(secret(), ProtocolConfig::default(), clock())
}

fn beacon() -> Beacon<FixedClock> {
    Beacon::with_clock(secret(), TokenLength::default(), clock())
}

#[tokio::test(start_paused = true)]
async fn authenticates_nearby_beacon() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (transport, sender) = ChannelTransport::new();
    let mut beacon = beacon();

    let first = beacon.current().clone();
    let second = beacon.roll().clone();
    for token in [&first, &first, &second] {
        sender
            .unbounded_send(Advertisement::new(AUTH_SERVICE_UUID_FULL, token.as_bytes(), -60))
            .unwrap();
    }

    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::Authenticated);
}

#[tokio::test(start_paused = true)]
async fn times_out_without_peer() {
    let (transport, _sender) = ChannelTransport::new();

    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn far_beacon_times_out() {
    let (transport, sender) = ChannelTransport::new();
    let mut beacon = beacon();

    for _ in 0..10 {
        sender
            .unbounded_send(Advertisement::new(AUTH_SERVICE_UUID_FULL, beacon.current().as_bytes(), -95))
            .unwrap();
        beacon.roll();
    }

    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn ignores_other_services() {
    let (transport, sender) = ChannelTransport::new();
    let mut beacon = beacon();

    let first = beacon.current().clone();
    let second = beacon.roll().clone();
    for token in [&first, &second] {
        sender
            .unbounded_send(Advertisement::new(
                "0000180f-0000-1000-8000-00805f9b34fb",
                token.as_bytes(),
                -60,
            ))
            .unwrap();
    }

    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn closed_stream_waits_for_deadline() {
    let (transport, sender) = ChannelTransport::new();
    sender
        .unbounded_send(Advertisement::new("fff0", b"lonely".to_vec(), -60))
        .unwrap();
    drop(sender);

    let started = tokio::time::Instant::now();
    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::TimedOut);
    assert!(started.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn authenticates_from_record_lines() {
    let mut beacon = beacon();
    let first = beacon.current().clone();
    let second = beacon.roll().clone();

    let input = format!(
        "# piped from a scanner\n{}\ngarbage line\n{}\n",
        format_record(AUTH_SERVICE_UUID_FULL, -70, first.as_bytes()),
        format_record(AUTH_SERVICE_UUID_FULL, -70, second.as_bytes()),
    );
    let (transport, sender) = ChannelTransport::new();
    spawn_record_reader(std::io::Cursor::new(input.into_bytes()), sender);

    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::Authenticated);
}

/// Reader that blocks until its paired sender goes away, like a terminal
/// nobody types into.
struct QuietInput(std::sync::mpsc::Receiver<()>);

impl std::io::Read for QuietInput {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}

#[tokio::test(start_paused = true)]
async fn quiet_input_does_not_hold_the_session() {
    let (hold, quiet) = std::sync::mpsc::channel::<()>();
    let (transport, sender) = ChannelTransport::new();
    let reader = spawn_record_reader(std::io::BufReader::new(QuietInput(quiet)), sender);

    let started = tokio::time::Instant::now();
    let session = ScanSession::with_machine(transport, verifier(), session_config());
    assert_eq!(session.run().await.unwrap(), SessionOutcome::TimedOut);
    assert!(started.elapsed() >= Duration::from_secs(10));

    // the session is done while the reader is still blocked on input
    assert!(!reader.is_finished());

    drop(hold);
    reader.join().unwrap();
}
