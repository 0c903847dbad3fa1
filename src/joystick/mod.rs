//! Joystick input
//!
//! This module provides the input side of the bridge:
//! - Decoding of Linux joystick API events
//! - A non-blocking reader for `/dev/input/jsN`
//! - A scripted event source for tests and replays

pub mod device;
pub mod event;

pub use device::{JoystickDevice, JoystickInfo};
pub use event::{InputEvent, JsEvent};

use log::debug;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JoystickError {
    #[error("Failed to open joystick {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Joystick ioctl failed: {0}")]
    Ioctl(#[from] nix::errno::Errno),

    #[error("Joystick read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Joystick disconnected")]
    Disconnected,
}

/// Source of decoded input events
pub trait EventSource {
    /// Fetch the next event without blocking.
    ///
    /// `Ok(None)` means nothing is available this cycle.
    fn poll_event(&mut self) -> Result<Option<InputEvent>, JoystickError>;
}

/// Replays a fixed list of events, then reports a disconnect
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    events: VecDeque<Option<InputEvent>>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = InputEvent>>(events: I) -> Self {
        Self {
            events: events.into_iter().map(Some).collect(),
        }
    }

    /// Queue an event
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(Some(event));
    }

    /// Queue an idle cycle (poll returns `Ok(None)` once)
    pub fn push_idle(&mut self) {
        self.events.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedSource {
    fn poll_event(&mut self) -> Result<Option<InputEvent>, JoystickError> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None => {
                debug!("Scripted source exhausted");
                Err(JoystickError::Disconnected)
            }
        }
    }
}
