//! Mock transport for testing.
//!
//! This transport records frames instead of writing them to a serial port.
//! Useful for testing the translator and manager without the gadget
//! attached.

use crate::nsgamepad::protocol::to_hex;
use crate::transport::{Transport, TransportError};
use log::info;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock transport that logs and records every frame.
///
/// Clones share the same frame log, so a test can keep one clone and hand
/// the other to the code under test.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
    fail_writes: bool,
    closed: Arc<Mutex<bool>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Snapshot of the frames written so far.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Most recent frame, if any.
    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.frames.lock().ok()?.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.lock().map(|c| *c).unwrap_or(false)
    }
}

impl Transport for MockTransport {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        if self.fail_writes {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "mock transport write failure",
            )));
        }

        info!("[MOCK TRANSPORT] Frame: {}", to_hex(frame));
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame.to_vec());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
        info!("[MOCK TRANSPORT] Closed");
        Ok(())
    }
}
