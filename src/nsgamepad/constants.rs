//! NSGadget wire protocol constants
//!
//! This module contains the constants shared by the state model and the
//! frame encoder:
//! - Frame header and trailer bytes
//! - Neutral axis/dpad values
//! - The compass lookup tables used by the dpad

// ============================================================================
// Frame Layout
// ============================================================================

/// Report ID, first byte of every frame
pub const REPORT_ID: u8 = 0x02;

/// Declared payload length (sub id + buttons + dpad + 4 sticks + reserved)
pub const PAYLOAD_LEN: u8 = 0x09;

/// Sub ID, follows the length byte
pub const SUB_ID: u8 = 0x02;

/// Reserved byte after the right stick Y position
pub const RESERVED: u8 = 0x00;

/// Trailer, last byte of every frame
pub const TRAILER: u8 = 0x03;

/// Total frame length on the wire
pub const FRAME_LEN: usize = PAYLOAD_LEN as usize + 3;

// Byte offsets inside a frame
pub const OFFSET_BUTTONS: usize = 3;
pub const OFFSET_DPAD: usize = 5;
pub const OFFSET_LEFT_X: usize = 6;
pub const OFFSET_LEFT_Y: usize = 7;
pub const OFFSET_RIGHT_X: usize = 8;
pub const OFFSET_RIGHT_Y: usize = 9;
pub const OFFSET_RESERVED: usize = 10;
pub const OFFSET_TRAILER: usize = 11;

// ============================================================================
// State Constants
// ============================================================================

/// Number of addressable buttons (indices 0..=13)
pub const BUTTON_COUNT: u8 = 14;

/// Mask of the meaningful bits in the 16-bit button field
pub const BUTTON_MASK: u16 = (1 << BUTTON_COUNT) - 1;

/// Center position of every 8-bit axis
pub const AXIS_CENTER: u8 = 128;

/// Numeric value of a centered dpad
pub const DPAD_CENTERED: u8 = 0x0F;

/// Offset added to a raw i16 sample before the 8-bit shift
pub const QUANTIZE_BIAS: i32 = 32767;

// ============================================================================
// Compass Tables
// ============================================================================

/// Dpad X position for each direction value (0..=7 compass order, 15 centered).
///
/// Indices 8..=16 all map to center so any out-of-table value stays neutral.
pub const COMPASS_DIR_X: [u8; 17] = [
    128, 255, 255, 255, 128, 0, 0, 0, 128, 128, 128, 128, 128, 128, 128, 128, 128,
];

/// Dpad Y position for each direction value (0..=7 compass order, 15 centered).
pub const COMPASS_DIR_Y: [u8; 17] = [
    0, 0, 128, 255, 255, 255, 128, 0, 128, 128, 128, 128, 128, 128, 128, 128, 128,
];

// ============================================================================
// Serial Defaults
// ============================================================================

/// Default serial device of the USB-serial adapter wired to the gadget
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

/// Default baud rate (8 x 115200)
pub const DEFAULT_BAUD_RATE: u32 = 8 * 115_200;

/// Default joystick device node
pub const DEFAULT_JOYSTICK_DEVICE: &str = "/dev/input/js0";
