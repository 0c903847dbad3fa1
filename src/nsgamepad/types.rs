//! NSGadget type definitions
//!
//! This module defines the basic data types of the controller state:
//! the button bitset, button names, dpad directions and axis selectors.

use crate::nsgamepad::constants::{BUTTON_COUNT, BUTTON_MASK, DPAD_CENTERED};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Button index {0} out of range (0..={max})", max = BUTTON_COUNT - 1)]
    ButtonOutOfRange(u8),
}

/// Named buttons of the emulated gamepad, valued by their bit index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NsButton {
    Y = 0,
    B = 1,
    A = 2,
    X = 3,
    LeftTrigger = 4,
    RightTrigger = 5,
    LeftThrottle = 6,
    RightThrottle = 7,
    Minus = 8,
    Plus = 9,
    LeftStick = 10,
    RightStick = 11,
    Home = 12,
    Capture = 13,
}

impl NsButton {
    pub const ALL: [NsButton; BUTTON_COUNT as usize] = [
        NsButton::Y,
        NsButton::B,
        NsButton::A,
        NsButton::X,
        NsButton::LeftTrigger,
        NsButton::RightTrigger,
        NsButton::LeftThrottle,
        NsButton::RightThrottle,
        NsButton::Minus,
        NsButton::Plus,
        NsButton::LeftStick,
        NsButton::RightStick,
        NsButton::Home,
        NsButton::Capture,
    ];

    /// Bit index of this button
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a button by bit index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Pressed-button bitset, bit n set when button n is held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Self = Self(0);

    /// Build from a raw field, dropping bits above the 14 addressable ones
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & BUTTON_MASK)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn is_pressed(self, index: u8) -> bool {
        index < BUTTON_COUNT && self.0 & (1 << index) != 0
    }

    pub fn set(&mut self, index: u8, pressed: bool) -> Result<(), StateError> {
        if index >= BUTTON_COUNT {
            return Err(StateError::ButtonOutOfRange(index));
        }
        if pressed {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Dpad direction as sent on the wire (compass order, 15 = centered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DpadDirection {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    Centered = DPAD_CENTERED,
}

impl DpadDirection {
    pub const ALL: [DpadDirection; 9] = [
        DpadDirection::Up,
        DpadDirection::UpRight,
        DpadDirection::Right,
        DpadDirection::DownRight,
        DpadDirection::Down,
        DpadDirection::DownLeft,
        DpadDirection::Left,
        DpadDirection::UpLeft,
        DpadDirection::Centered,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Clamp an arbitrary value: 0..=7 map to their direction, anything else is centered
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => Self::Up,
            1 => Self::UpRight,
            2 => Self::Right,
            3 => Self::DownRight,
            4 => Self::Down,
            5 => Self::DownLeft,
            6 => Self::Left,
            7 => Self::UpLeft,
            _ => Self::Centered,
        }
    }

    /// Strict lookup for a byte read off the wire
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0..=7 => Some(Self::from_value(value as i32)),
            DPAD_CENTERED => Some(Self::Centered),
            _ => None,
        }
    }
}

/// Analog stick axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

/// Dpad shadow axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DpadAxis {
    X,
    Y,
}
