//! Canonical controller state and the transforms that translate raw input into it
//!
//! Everything here is pure: the transforms mutate a [`ControllerState`] value
//! and never touch a transport. Transmission is layered on top by
//! [`NsGamepad`](crate::nsgamepad::gamepad::NsGamepad).

use crate::nsgamepad::constants::{AXIS_CENTER, COMPASS_DIR_X, COMPASS_DIR_Y, QUANTIZE_BIAS};
use crate::nsgamepad::types::{Buttons, DpadAxis, DpadDirection, StateError, StickAxis};

/// Map a raw signed 16-bit axis sample to an 8-bit position.
///
/// `(raw + 32767) >> 8`, with 127 lifted to 128 so the resting position of a
/// stick reads as exact center. `-32768` would compute to -1 and is floored to 0.
pub fn quantize_axis(raw: i16) -> u8 {
    let position = ((raw as i32 + QUANTIZE_BIAS) >> 8).clamp(0, u8::MAX as i32) as u8;
    if position == AXIS_CENTER - 1 {
        AXIS_CENTER
    } else {
        position
    }
}

/// Resolve two dpad axis positions into a direction.
///
/// Each axis is compared against exactly 128: below is the negative side
/// (left / up), above is the positive side (right / down).
pub fn resolve_dpad(x: u8, y: u8) -> DpadDirection {
    use std::cmp::Ordering::{Equal, Greater, Less};

    match (x.cmp(&AXIS_CENTER), y.cmp(&AXIS_CENTER)) {
        (Equal, Equal) => DpadDirection::Centered,
        (Equal, Less) => DpadDirection::Up,
        (Equal, Greater) => DpadDirection::Down,
        (Less, Equal) => DpadDirection::Left,
        (Less, Less) => DpadDirection::UpLeft,
        (Less, Greater) => DpadDirection::DownLeft,
        (Greater, Equal) => DpadDirection::Right,
        (Greater, Less) => DpadDirection::UpRight,
        (Greater, Greater) => DpadDirection::DownRight,
    }
}

/// Representative (x, y) axis pair for a direction (inverse of [`resolve_dpad`])
pub fn compass_axes(direction: DpadDirection) -> (u8, u8) {
    let index = direction.value() as usize;
    (COMPASS_DIR_X[index], COMPASS_DIR_Y[index])
}

/// Complete controller snapshot serialized into every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub buttons: Buttons,
    pub left_stick_x: u8,
    pub left_stick_y: u8,
    pub right_stick_x: u8,
    pub right_stick_y: u8,
    pub dpad: DpadDirection,

    /// Shadow dpad axes, only used to recompute `dpad`
    pub dpad_axis_x: u8,
    pub dpad_axis_y: u8,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ControllerState {
    /// Sticks centered, no buttons, dpad centered
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            left_stick_x: AXIS_CENTER,
            left_stick_y: AXIS_CENTER,
            right_stick_x: AXIS_CENTER,
            right_stick_y: AXIS_CENTER,
            dpad: DpadDirection::Centered,
            dpad_axis_x: AXIS_CENTER,
            dpad_axis_y: AXIS_CENTER,
        }
    }

    /// Press or release a single button (0..=13)
    pub fn apply_button(&mut self, index: u8, pressed: bool) -> Result<(), StateError> {
        self.buttons.set(index, pressed)
    }

    /// Replace the whole button field
    pub fn apply_buttons(&mut self, raw: u16) {
        self.buttons = Buttons::from_raw(raw);
    }

    pub fn release_all(&mut self) {
        self.buttons.clear();
    }

    /// Quantize a raw 16-bit sample into the selected stick axis
    pub fn apply_axis(&mut self, axis: StickAxis, raw: i16) {
        self.apply_stick_position(axis, quantize_axis(raw));
    }

    /// Set a stick axis to an already-quantized position
    pub fn apply_stick_position(&mut self, axis: StickAxis, position: u8) {
        match axis {
            StickAxis::LeftX => self.left_stick_x = position,
            StickAxis::LeftY => self.left_stick_y = position,
            StickAxis::RightX => self.right_stick_x = position,
            StickAxis::RightY => self.right_stick_y = position,
        }
    }

    /// Move one dpad axis and recompute the direction.
    ///
    /// Positions outside 0..=255 are treated as neutral.
    pub fn apply_dpad_axis(&mut self, axis: DpadAxis, position: i32) {
        let position = u8::try_from(position).unwrap_or(AXIS_CENTER);
        match axis {
            DpadAxis::X => self.dpad_axis_x = position,
            DpadAxis::Y => self.dpad_axis_y = position,
        }
        self.dpad = resolve_dpad(self.dpad_axis_x, self.dpad_axis_y);
    }

    /// Set the dpad from a direction value and derive the shadow axes.
    ///
    /// Values outside 0..=7 center the dpad.
    pub fn apply_dpad_compass(&mut self, direction: i32) {
        self.set_dpad(DpadDirection::from_value(direction));
    }

    pub fn set_dpad(&mut self, direction: DpadDirection) {
        let (x, y) = compass_axes(direction);
        self.dpad = direction;
        self.dpad_axis_x = x;
        self.dpad_axis_y = y;
    }
}
