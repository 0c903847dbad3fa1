//! Linux joystick API event decoding
//!
//! Each read from `/dev/input/jsN` yields one 8-byte `struct js_event`:
//!
//! ```text
//! u32 time (ms) | i16 value | u8 type | u8 number
//! ```

/// Size of one `struct js_event`
pub const JS_EVENT_SIZE: usize = 8;

/// Button pressed/released
pub const JS_EVENT_BUTTON: u8 = 0x01;
/// Joystick moved
pub const JS_EVENT_AXIS: u8 = 0x02;
/// Initial state of the device, flagged on the first delivery per control
pub const JS_EVENT_INIT: u8 = 0x80;

/// Raw event as delivered by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsEvent {
    pub time: u32,
    pub value: i16,
    pub kind: u8,
    pub number: u8,
}

/// Decoded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Button { index: u8, pressed: bool, initial: bool },
    Axis { index: u8, value: i16, initial: bool },
}

impl JsEvent {
    /// Parse a raw event buffer (native byte order, as the kernel writes it)
    pub fn parse(buf: &[u8; JS_EVENT_SIZE]) -> Self {
        Self {
            time: u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]),
            value: i16::from_ne_bytes([buf[4], buf[5]]),
            kind: buf[6],
            number: buf[7],
        }
    }

    pub fn to_bytes(&self) -> [u8; JS_EVENT_SIZE] {
        let mut buf = [0u8; JS_EVENT_SIZE];
        buf[0..4].copy_from_slice(&self.time.to_ne_bytes());
        buf[4..6].copy_from_slice(&self.value.to_ne_bytes());
        buf[6] = self.kind;
        buf[7] = self.number;
        buf
    }

    pub fn is_initial(&self) -> bool {
        self.kind & JS_EVENT_INIT != 0
    }

    /// Classify the event. Unknown types yield `None`.
    pub fn into_input(self) -> Option<InputEvent> {
        let initial = self.is_initial();
        match self.kind & !JS_EVENT_INIT {
            JS_EVENT_BUTTON => Some(InputEvent::Button {
                index: self.number,
                pressed: self.value != 0,
                initial,
            }),
            JS_EVENT_AXIS => Some(InputEvent::Axis {
                index: self.number,
                value: self.value,
                initial,
            }),
            _ => None,
        }
    }
}
