//! Integration tests for the gamepad over the mock transport

use nsgamepad_rs::nsgamepad::{decode, encode, to_hex, DpadAxis, StickAxis, FRAME_LEN};
use nsgamepad_rs::{ControllerState, DpadDirection, MockTransport, NsButton, NsGamepad};

fn session() -> (NsGamepad<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let observer = transport.clone();
    (NsGamepad::begin(transport).unwrap(), observer)
}

#[test]
fn test_every_frame_has_fixed_framing() {
    let (mut gamepad, observer) = session();

    gamepad.press(0).unwrap();
    gamepad.set_axis(StickAxis::LeftX, 32767).unwrap();
    gamepad.set_dpad_axis(DpadAxis::X, 0).unwrap();
    gamepad.set_dpad_compass(7).unwrap();
    gamepad.release_all().unwrap();

    for frame in observer.frames() {
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(&frame[0..3], &[0x02, 0x09, 0x02]);
        assert_eq!(frame[10], 0x00);
        assert_eq!(frame[11], 0x03);
    }
}

#[test]
fn test_reference_frame() {
    let state = ControllerState {
        buttons: nsgamepad_rs::nsgamepad::Buttons::from_raw(0x0005),
        left_stick_x: 200,
        left_stick_y: 50,
        right_stick_x: 10,
        right_stick_y: 250,
        ..ControllerState::neutral()
    };

    let frame = encode(&state);
    assert_eq!(to_hex(&frame), "02 09 02 05 00 0F C8 32 0A FA 00 03");
    assert_eq!(decode(&frame).unwrap(), state);
}

#[test]
fn test_frames_decode_to_gamepad_state() {
    let (mut gamepad, observer) = session();

    gamepad.press_button(NsButton::Capture).unwrap();
    gamepad.set_axis(StickAxis::RightY, -32767).unwrap();
    gamepad.set_dpad(DpadDirection::DownLeft).unwrap();

    let decoded = decode(&observer.last_frame().unwrap()).unwrap();
    assert_eq!(decoded, *gamepad.state());
    assert!(decoded.buttons.is_pressed(NsButton::Capture.index()));
    assert_eq!(decoded.right_stick_y, 0);
    assert_eq!(decoded.dpad, DpadDirection::DownLeft);
}

#[test]
fn test_dpad_axes_follow_resolver() {
    let (mut gamepad, observer) = session();

    gamepad.set_dpad_axis(DpadAxis::X, 255).unwrap();
    gamepad.set_dpad_axis(DpadAxis::Y, 255).unwrap();
    assert_eq!(observer.last_frame().unwrap()[5], DpadDirection::DownRight.value());

    // Out of range positions count as neutral on that axis
    gamepad.set_dpad_axis(DpadAxis::Y, 300).unwrap();
    assert_eq!(observer.last_frame().unwrap()[5], DpadDirection::Right.value());

    gamepad.set_dpad_axis(DpadAxis::X, -1).unwrap();
    assert_eq!(observer.last_frame().unwrap()[5], 0x0F);
}

#[test]
fn test_set_buttons_masks_to_fourteen_bits() {
    let (mut gamepad, observer) = session();
    gamepad.set_buttons(0xFFFF).unwrap();

    let frame = observer.last_frame().unwrap();
    assert_eq!(u16::from_le_bytes([frame[3], frame[4]]), 0x3FFF);
}
