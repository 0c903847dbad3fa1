//! NSGadget gamepad support
//!
//! This module provides the controller side of the bridge:
//! - The canonical controller state and its input transforms
//! - Dpad resolution and axis quantization
//! - Frame encoding for the gadget's serial protocol
//! - A write-through gamepad that sends a frame after every change

pub mod constants;
pub mod gamepad;
pub mod protocol;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use gamepad::*;
pub use protocol::*;
pub use state::*;
pub use types::*;
