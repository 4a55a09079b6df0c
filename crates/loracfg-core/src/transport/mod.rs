//! Serial command/response transport.
//!
//! A transport performs one request/response exchange at a time: write the
//! full command, wait for the module to settle, read once. The exchange runs
//! on a worker thread raced against a watchdog, so a silent or wedged device
//! surfaces as `NoResponse` within the configured timeout.

use std::time::Duration;

mod error;
mod hexdump;
mod serial;
mod stream;

pub use error::TransportError;
pub use hexdump::hex_dump;
pub use serial::SerialConnector;
pub use stream::StreamTransport;

/// One command/response exchange with a module.
pub trait Transport {
    fn exchange(&mut self, command: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Opens an exclusively owned transport for one operation.
pub trait Connector {
    type Transport: Transport;

    fn connect(&self, device: &str) -> Result<Self::Transport, TransportError>;
}

/// Timing of a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOptions {
    /// Watchdog bound for the whole exchange.
    pub timeout: Duration,
    /// Pause between the write and the read.
    pub settle_delay: Duration,
    /// Upper bound on one reply.
    pub read_buffer_len: usize,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            settle_delay: Duration::from_millis(500),
            read_buffer_len: 1024,
        }
    }
}

/// Serial line settings; the modules talk 8-N-1 in configuration mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialOptions {
    pub baud_rate: u32,
    pub exchange: ExchangeOptions,
}

impl Default for SerialOptions {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            exchange: ExchangeOptions::default(),
        }
    }
}
