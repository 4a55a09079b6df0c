use std::io::{Read, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use log::{debug, info, warn};

use super::error::TransportError;
use super::hexdump::hex_dump;
use super::{ExchangeOptions, Transport};

/// Transport over any byte stream, with a watchdog on every exchange.
///
/// The link sits behind `Arc<Mutex<_>>` so that a worker abandoned by the
/// watchdog can finish its read without blocking the caller. The link is
/// closed when the transport and every abandoned worker have dropped it.
pub struct StreamTransport<L> {
    device: String,
    link: Arc<Mutex<L>>,
    options: ExchangeOptions,
}

impl<L> StreamTransport<L>
where
    L: Read + Write + Send + 'static,
{
    pub fn new(device: impl Into<String>, link: L, options: ExchangeOptions) -> Self {
        Self {
            device: device.into(),
            link: Arc::new(Mutex::new(link)),
            options,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn options(&self) -> &ExchangeOptions {
        &self.options
    }
}

impl<L> Transport for StreamTransport<L>
where
    L: Read + Write + Send + 'static,
{
    fn exchange(&mut self, command: &[u8]) -> Result<Vec<u8>, TransportError> {
        info!(
            "{}: sending {} bytes\n{}",
            self.device,
            command.len(),
            hex_dump(command)
        );

        let (tx, rx) = mpsc::channel();
        let link = Arc::clone(&self.link);
        let payload = command.to_vec();
        let options = self.options.clone();
        thread::Builder::new()
            .name(format!("exchange-{}", self.device))
            .spawn(move || {
                // the receiver is gone once the watchdog fired
                let _ = tx.send(run_exchange(&link, &payload, &options));
            })
            .map_err(TransportError::Spawn)?;

        let timeout = self.options.timeout;
        match rx.recv_timeout(timeout) {
            Ok(Ok(reply)) => {
                info!(
                    "{}: received {} bytes\n{}",
                    self.device,
                    reply.len(),
                    hex_dump(&reply)
                );
                Ok(reply)
            }
            Ok(Err(err)) => {
                warn!("{}: exchange failed: {err}", self.device);
                Err(err)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                warn!(
                    "{}: no response within {} ms",
                    self.device,
                    timeout.as_millis()
                );
                Err(TransportError::NoResponse { timeout })
            }
        }
    }
}

impl<L> Drop for StreamTransport<L> {
    fn drop(&mut self) {
        info!("{}: closing connection", self.device);
    }
}

fn run_exchange<L: Read + Write>(
    link: &Mutex<L>,
    command: &[u8],
    options: &ExchangeOptions,
) -> Result<Vec<u8>, TransportError> {
    let mut link = link.lock().unwrap_or_else(PoisonError::into_inner);
    link.write_all(command)
        .and_then(|()| link.flush())
        .map_err(TransportError::WriteFailed)?;

    thread::sleep(options.settle_delay);

    let mut buffer = vec![0u8; options.read_buffer_len];
    let read = link.read(&mut buffer).map_err(TransportError::ReadFailed)?;
    if read == 0 {
        return Err(TransportError::EmptyRead);
    }
    buffer.truncate(read);
    debug!("exchange read {read} bytes");
    Ok(buffer)
}
