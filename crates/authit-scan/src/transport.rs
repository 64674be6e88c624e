use async_trait::async_trait;
use futures::channel::mpsc;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::ScanError;
use crate::types::Advertisement;

/// Ordered stream of received advertisements.
pub type AdvertisementStream = BoxStream<'static, Advertisement>;

/// A source of advertisements, e.g. a BLE scanner.
///
/// `start` hands out the advertisements in the order they were observed;
/// `stop` releases whatever the scan holds. The session calls `stop` exactly
/// once after a successful `start`.
#[async_trait]
pub trait ScanTransport: Send {
    async fn start(&mut self) -> Result<AdvertisementStream, ScanError>;
    async fn stop(&mut self) -> Result<(), ScanError>;
}

pub type AdvertisementSender = mpsc::UnboundedSender<Advertisement>;

/// In-process transport fed through an [`AdvertisementSender`].
pub struct ChannelTransport {
    receiver: Option<mpsc::UnboundedReceiver<Advertisement>>,
    scanning: bool,
}

impl ChannelTransport {
    pub fn new() -> (Self, AdvertisementSender) {
        let (sender, receiver) = mpsc::unbounded();
        (
            Self { receiver: Some(receiver), scanning: false },
            sender,
        )
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }
}

#[async_trait]
impl ScanTransport for ChannelTransport {
    async fn start(&mut self) -> Result<AdvertisementStream, ScanError> {
        let receiver = self.receiver.take().ok_or(ScanError::AlreadyScanning)?;
        self.scanning = true;
        Ok(receiver.boxed())
    }

    async fn stop(&mut self) -> Result<(), ScanError> {
        self.scanning = false;
        Ok(())
    }
}
