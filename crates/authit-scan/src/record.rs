//! Line oriented advertisement records, `<service-uuid> <rssi> <payload-hex>`.
//!
//! Lets an external scanner (or the beacon binary) be piped into a client.

use std::io::BufRead;
use std::thread;

use authit_auth::Rssi;

use crate::error::ScanError;
use crate::transport::AdvertisementSender;
use crate::types::Advertisement;

/// Parse one record line. Blank lines and `#` comments yield `Ok(None)`.
/// The payload field may be omitted for an empty payload.
pub fn parse_record(line: &str) -> Result<Option<Advertisement>, ScanError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason| ScanError::MalformedRecord {
        line: trimmed.to_string(),
        reason,
    };

    let mut fields = trimmed.split_whitespace();
    let uuid = fields.next().ok_or_else(|| malformed("missing service uuid"))?;
    let rssi = fields
        .next()
        .ok_or_else(|| malformed("missing rssi"))?
        .parse::<Rssi>()
        .map_err(|_| malformed("rssi is not an integer"))?;
    let payload = match fields.next() {
        Some(payload) => hex::decode(payload).map_err(|_| malformed("payload is not hex"))?,
        None => Vec::new(),
    };
    if fields.next().is_some() {
        return Err(malformed("trailing fields"));
    }

    Ok(Some(Advertisement::new(uuid, payload, rssi)))
}

pub fn format_record(service_uuid: &str, rssi: Rssi, payload: &[u8]) -> String {
    format!("{} {} {}", service_uuid, rssi, hex::encode(payload))
}

/// Feed records read from `reader` into a [`ChannelTransport`] sender on a
/// dedicated OS thread. Malformed lines are logged and skipped. The thread
/// ends at end of input, on a read error, or once the receiving transport is
/// dropped.
///
/// The thread is plain `std`, so a reader blocked on a quiet stdin never
/// keeps the runtime (or the process) alive after the session ends.
///
/// [`ChannelTransport`]: crate::transport::ChannelTransport
pub fn spawn_record_reader<R>(reader: R, sender: AdvertisementSender) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("failed to read advertisement record: {}", e);
                    break;
                }
            };

            let advertisement = match parse_record(&line) {
                Ok(Some(advertisement)) => advertisement,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };

            if sender.unbounded_send(advertisement).is_err() {
                log::debug!("scan ended, record reader stops");
                break;
            }
        }
    })
}
