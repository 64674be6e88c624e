use futures::channel::{mpsc, oneshot};
use futures::stream::Fuse;
use futures::StreamExt;

use authit_auth::{AuthState, AuthStateMachine, EpochClock, Transition};

use crate::transport::AdvertisementStream;
use crate::types::Advertisement;

/// Sole owner of the state machine. Feeds it every matching advertisement,
/// in order, until it authenticates, the stream ends or it is told to stop.
pub struct ScanEventLoop<C> {
    machine: AuthStateMachine<C>,
    service_uuid: String,

    advertisements: Fuse<AdvertisementStream>,
    done_sender: Option<oneshot::Sender<()>>,
    termination_receiver: mpsc::Receiver<()>,
}

impl<C: EpochClock> ScanEventLoop<C> {
    pub fn new(
        machine: AuthStateMachine<C>,
        service_uuid: String,
        advertisements: AdvertisementStream,
        done_sender: oneshot::Sender<()>,
        termination_receiver: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            machine,
            service_uuid,
            advertisements: advertisements.fuse(),
            done_sender: Some(done_sender),
            termination_receiver,
        }
    }

    pub async fn run(mut self) -> AuthStateMachine<C> {
        loop {
            futures::select! {
                advertisement = self.advertisements.next() => match advertisement {
                    Some(advertisement) => {
                        if self.handle_advertisement(&advertisement) {
                            break;
                        }
                    }
                    None => {
                        log::warn!("advertisement stream ended before authentication");
                        break;
                    }
                },

                _ = self.termination_receiver.next() => {
                    break;
                }
            }
        }

        self.machine
    }

    /// Returns `true` once the machine is terminal.
    fn handle_advertisement(&mut self, advertisement: &Advertisement) -> bool {
        for payload in advertisement.payloads_for(&self.service_uuid) {
            match self.machine.on_broadcast(payload, advertisement.rssi) {
                Transition::Authenticated | Transition::AlreadyAuthenticated => {
                    if let Some(sender) = self.done_sender.take() {
                        // the waiting side may already have timed out
                        let _ = sender.send(());
                    }
                    return true;
                }
                Transition::Advanced { .. } | Transition::Duplicate | Transition::Ignored => {}
            }
        }

        self.machine.auth_state() == AuthState::Authenticated
    }
}
