//! nsgamepad-rs: Linux joystick to NSGadget serial bridge
//!
//! This library reads events from a Linux joystick device, maps them onto a
//! Nintendo Switch compatible controller state and streams the state as
//! fixed 12-byte frames to the NSGadget over a serial link.

pub mod joystick;
pub mod manager;
pub mod mapping;
pub mod nsgamepad;
pub mod transport;

// Re-export commonly used items
pub use joystick::{EventSource, InputEvent, JoystickDevice, ScriptedSource};
pub use manager::{run_blocking, BridgeManager, BridgeStatus};
pub use mapping::{Config, MappingTranslator};
pub use nsgamepad::{ControllerState, DpadDirection, NsButton, NsGamepad};
pub use transport::{MockTransport, SerialTransport, Transport};
