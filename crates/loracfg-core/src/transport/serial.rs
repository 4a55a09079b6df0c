use log::info;
use serialport::{DataBits, Parity, SerialPort, StopBits};

use super::error::TransportError;
use super::stream::StreamTransport;
use super::{Connector, SerialOptions};

/// Opens host serial ports with `serialport`.
#[derive(Debug, Clone, Default)]
pub struct SerialConnector {
    options: SerialOptions,
}

impl SerialConnector {
    pub fn new(options: SerialOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SerialOptions {
        &self.options
    }
}

impl Connector for SerialConnector {
    type Transport = StreamTransport<Box<dyn SerialPort>>;

    fn connect(&self, device: &str) -> Result<Self::Transport, TransportError> {
        let port = serialport::new(device, self.options.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(self.options.exchange.timeout)
            .open()
            .map_err(|err| TransportError::PortOpenFailed {
                device: device.to_string(),
                reason: err.to_string(),
            })?;
        info!("{device}: opened at {} baud (8N1)", self.options.baud_rate);
        Ok(StreamTransport::new(
            device,
            port,
            self.options.exchange.clone(),
        ))
    }
}
