//! Write-through gamepad
//!
//! [`NsGamepad`] owns the controller state and the transport. Every mutating
//! call applies one transform from [`state`](crate::nsgamepad::state) and then
//! sends exactly one full frame. Nothing is batched or diffed, so repeating
//! an input repeats the frame.

use crate::nsgamepad::protocol::{encode, to_hex};
use crate::nsgamepad::state::ControllerState;
use crate::nsgamepad::types::{DpadAxis, DpadDirection, NsButton, StateError, StickAxis};
use crate::transport::{Transport, TransportError};
use log::{debug, info, trace};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GamepadError {
    #[error("Rejected input: {0}")]
    State(#[from] StateError),

    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
}

pub struct NsGamepad<T: Transport> {
    state: ControllerState,
    transport: T,
    frames_sent: u64,
}

impl<T: Transport> NsGamepad<T> {
    /// Start a session: reset to neutral and send the initial frame
    pub fn begin(transport: T) -> Result<Self, GamepadError> {
        let mut gamepad = Self {
            state: ControllerState::neutral(),
            transport,
            frames_sent: 0,
        };
        gamepad.write()?;
        info!("Gamepad session started");
        Ok(gamepad)
    }

    /// End the session, close the transport and hand it back
    pub fn end(mut self) -> Result<T, GamepadError> {
        self.transport.close()?;
        info!("Gamepad session ended after {} frames", self.frames_sent);
        Ok(self.transport)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the current state
    pub fn write(&mut self) -> Result<(), GamepadError> {
        let frame = encode(&self.state);
        trace!("TX {}", to_hex(&frame));
        self.transport.write_frame(&frame)?;
        self.frames_sent += 1;
        Ok(())
    }

    /// Press button 0..=13
    pub fn press(&mut self, index: u8) -> Result<(), GamepadError> {
        self.state.apply_button(index, true)?;
        debug!("Button {} pressed", index);
        self.write()
    }

    /// Release button 0..=13
    pub fn release(&mut self, index: u8) -> Result<(), GamepadError> {
        self.state.apply_button(index, false)?;
        debug!("Button {} released", index);
        self.write()
    }

    pub fn press_button(&mut self, button: NsButton) -> Result<(), GamepadError> {
        self.press(button.index())
    }

    pub fn release_button(&mut self, button: NsButton) -> Result<(), GamepadError> {
        self.release(button.index())
    }

    pub fn release_all(&mut self) -> Result<(), GamepadError> {
        self.state.release_all();
        self.write()
    }

    /// Set all 14 buttons at once
    pub fn set_buttons(&mut self, raw: u16) -> Result<(), GamepadError> {
        self.state.apply_buttons(raw);
        self.write()
    }

    /// Move a stick axis from a raw 16-bit sample
    pub fn set_axis(&mut self, axis: StickAxis, raw: i16) -> Result<(), GamepadError> {
        self.state.apply_axis(axis, raw);
        self.write()
    }

    /// Move a stick axis to a 0..=255 position (128 = center)
    pub fn set_stick_position(&mut self, axis: StickAxis, position: u8) -> Result<(), GamepadError> {
        self.state.apply_stick_position(axis, position);
        self.write()
    }

    /// Move a dpad axis (0..=255, anything else is neutral)
    pub fn set_dpad_axis(&mut self, axis: DpadAxis, position: i32) -> Result<(), GamepadError> {
        self.state.apply_dpad_axis(axis, position);
        debug!("Dpad axis {:?} -> {:?}", axis, self.state.dpad);
        self.write()
    }

    /// Set the dpad direction (0..=7, anything else is centered)
    pub fn set_dpad_compass(&mut self, direction: i32) -> Result<(), GamepadError> {
        self.state.apply_dpad_compass(direction);
        self.write()
    }

    pub fn set_dpad(&mut self, direction: DpadDirection) -> Result<(), GamepadError> {
        self.state.set_dpad(direction);
        self.write()
    }

    /// Return every control to neutral
    pub fn reset(&mut self) -> Result<(), GamepadError> {
        self.state = ControllerState::neutral();
        self.write()
    }
}
