mod event_loop;

use futures::channel::{mpsc, oneshot};
use tokio::time::{self, Instant};

use authit_auth::{AuthStateMachine, EpochClock, SecretDigest, SystemClock};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::transport::ScanTransport;
use crate::types::SessionOutcome;

pub use event_loop::ScanEventLoop;

/// One authentication attempt: scan until a nearby peer proves it holds the
/// secret, or until the deadline.
pub struct ScanSession<T, C = SystemClock> {
    transport: T,
    machine: AuthStateMachine<C>,
    config: ScanConfig,
}

impl<T: ScanTransport> ScanSession<T, SystemClock> {
    pub fn new(transport: T, secret: SecretDigest, config: ScanConfig) -> Self {
        let machine = AuthStateMachine::new(secret, config.protocol);
        Self { transport, machine, config }
    }
}

impl<T: ScanTransport, C: EpochClock> ScanSession<T, C> {
    pub fn with_machine(transport: T, machine: AuthStateMachine<C>, config: ScanConfig) -> Self {
        Self { transport, machine, config }
    }

    /// Run the scan. A timeout is an outcome, not an error; errors only come
    /// from the transport itself.
    pub async fn run(mut self) -> Result<SessionOutcome, ScanError> {
        let deadline = Instant::now() + self.config.timeout;
        let advertisements = self.transport.start().await?;
        log::debug!("scanning for service {}", self.config.service_uuid());

        let (done_sender, done_receiver) = oneshot::channel();
        let (termination_sender, termination_receiver) = mpsc::channel(0);

        let event_loop = ScanEventLoop::new(
            self.machine,
            self.config.service_uuid().to_string(),
            advertisements,
            done_sender,
            termination_receiver,
        );

        let (machine, outcome) = futures::join!(
            event_loop.run(),
            wait_for_outcome(done_receiver, deadline, &self.config, termination_sender),
        );
        log::debug!(
            "scan finished: {:?}, {} malformed payloads dropped",
            outcome,
            machine.rejected_payloads()
        );

        self.transport.stop().await?;
        Ok(outcome)
    }
}

/// Waits for the done signal or the deadline, logging progress meanwhile.
/// Never touches protocol state; on return the event loop is told to stop.
async fn wait_for_outcome(
    mut done_receiver: oneshot::Receiver<()>,
    deadline: Instant,
    config: &ScanConfig,
    mut termination_sender: mpsc::Sender<()>,
) -> SessionOutcome {
    let sleep = time::sleep_until(deadline);
    tokio::pin!(sleep);
    let mut progress = time::interval(config.progress_interval);
    let mut dots = 1;
    let mut scanning = true;

    let outcome = loop {
        tokio::select! {
            done = &mut done_receiver, if scanning => match done {
                Ok(()) => break SessionOutcome::Authenticated,
                // event loop gave up before authenticating, only the deadline is left
                Err(_) => scanning = false,
            },
            _ = &mut sleep => break SessionOutcome::TimedOut,
            _ = progress.tick() => {
                log::info!("Waiting for Auth-It device{}", ".".repeat(dots));
                dots = dots % 3 + 1;
            }
        }
    };

    // only fails when the event loop already returned
    let _ = termination_sender.try_send(());
    outcome
}
