//! NSGadget frame encoding and decoding
//!
//! Every state update is sent as one fixed frame:
//!
//! ```text
//! 02 09 02 <buttons lo> <buttons hi> <dpad> <lx> <ly> <rx> <ry> 00 03
//! ```
//!
//! Multi-byte fields are little-endian. The gadget rejects any frame whose
//! constant bytes differ from the values above.

use crate::nsgamepad::constants::*;
use crate::nsgamepad::state::{compass_axes, ControllerState};
use crate::nsgamepad::types::{Buttons, DpadDirection};
use thiserror::Error;

/// One encoded frame
pub type Frame = [u8; FRAME_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Frame length {0}, expected {FRAME_LEN}")]
    Length(usize),

    #[error("Unexpected byte 0x{found:02x} at offset {offset} (expected 0x{expected:02x})")]
    Constant { offset: usize, expected: u8, found: u8 },

    #[error("Invalid dpad value 0x{0:02x}")]
    InvalidDpad(u8),
}

/// Serialize the full controller state into a frame
pub fn encode(state: &ControllerState) -> Frame {
    let [buttons_lo, buttons_hi] = state.buttons.raw().to_le_bytes();
    [
        REPORT_ID,
        PAYLOAD_LEN,
        SUB_ID,
        buttons_lo,
        buttons_hi,
        state.dpad.value(),
        state.left_stick_x,
        state.left_stick_y,
        state.right_stick_x,
        state.right_stick_y,
        RESERVED,
        TRAILER,
    ]
}

/// Parse a frame back into a controller state.
///
/// The dpad shadow axes are not on the wire; they are derived from the
/// decoded direction.
pub fn decode(data: &[u8]) -> Result<ControllerState, FrameError> {
    if data.len() != FRAME_LEN {
        return Err(FrameError::Length(data.len()));
    }

    for (offset, expected) in [
        (0, REPORT_ID),
        (1, PAYLOAD_LEN),
        (2, SUB_ID),
        (OFFSET_RESERVED, RESERVED),
        (OFFSET_TRAILER, TRAILER),
    ] {
        if data[offset] != expected {
            return Err(FrameError::Constant {
                offset,
                expected,
                found: data[offset],
            });
        }
    }

    let raw_dpad = data[OFFSET_DPAD];
    let dpad = DpadDirection::from_wire(raw_dpad).ok_or(FrameError::InvalidDpad(raw_dpad))?;
    let (dpad_axis_x, dpad_axis_y) = compass_axes(dpad);

    Ok(ControllerState {
        buttons: Buttons::from_raw(u16::from_le_bytes([
            data[OFFSET_BUTTONS],
            data[OFFSET_BUTTONS + 1],
        ])),
        left_stick_x: data[OFFSET_LEFT_X],
        left_stick_y: data[OFFSET_LEFT_Y],
        right_stick_x: data[OFFSET_RIGHT_X],
        right_stick_y: data[OFFSET_RIGHT_Y],
        dpad,
        dpad_axis_x,
        dpad_axis_y,
    })
}

/// Format a frame as space-separated hex for logging
pub fn to_hex(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
