//! Transport abstraction for delivering frames to the gadget
//!
//! The bridge only uses the write direction. Delivery is assumed reliable;
//! there is no acknowledgement or retry at this layer.

pub mod mock;
pub mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to open serial port {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport is closed")]
    Closed,
}

/// Byte-oriented output channel to the gadget
pub trait Transport {
    /// Write one complete frame, blocking until it has been handed to the channel
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Release the channel. Further writes fail with [`TransportError::Closed`].
    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        (**self).write_frame(frame)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}
