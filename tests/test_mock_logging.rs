//! Test to verify the mock transport and gamepad log output correctly

use nsgamepad_rs::transport::{MockTransport, Transport};
use nsgamepad_rs::{NsButton, NsGamepad};

#[test]
fn test_mock_transport_logs() {
    // Initialize a simple logger for testing
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();

    let mut transport = MockTransport::new();

    // These should log at info level (visible with RUST_LOG=info)
    assert!(transport.write_frame(&[0x02, 0x09, 0x02]).is_ok());
    assert!(transport.close().is_ok());
}

#[test]
fn test_gamepad_session_logs() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();

    // Frames are traced as hex, button changes at debug level
    let mut gamepad = NsGamepad::begin(MockTransport::new()).unwrap();
    assert!(gamepad.press_button(NsButton::Plus).is_ok());
    assert!(gamepad.release_button(NsButton::Plus).is_ok());
    assert!(gamepad.end().is_ok());
}
