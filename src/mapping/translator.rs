//! Mapping translator - applies joystick events to the gamepad
//!
//! This is the core of the event-driven bridge. It receives decoded joystick
//! events and drives the corresponding [`NsGamepad`] operation based on the
//! loaded mapping. Every applied event results in exactly one frame.

use crate::joystick::InputEvent;
use crate::mapping::config::{AxisTarget, Mapping};
use crate::nsgamepad::gamepad::{GamepadError, NsGamepad};
use crate::nsgamepad::state::quantize_axis;
use crate::nsgamepad::types::{DpadAxis, StickAxis};
use crate::transport::Transport;
use log::{trace, warn};

/// Translates joystick events into gamepad operations
#[derive(Debug, Clone, Default)]
pub struct MappingTranslator {
    mapping: Mapping,
}

impl MappingTranslator {
    pub fn new(mapping: Mapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Apply one event.
    ///
    /// Returns `Ok(true)` when a frame was sent and `Ok(false)` when the event
    /// has no binding or was rejected. Only transport failures are errors.
    pub fn apply<T: Transport>(
        &self,
        gamepad: &mut NsGamepad<T>,
        event: &InputEvent,
    ) -> Result<bool, GamepadError> {
        let result = match *event {
            InputEvent::Button { index, pressed, .. } => self.on_button(gamepad, index, pressed),
            InputEvent::Axis { index, value, .. } => self.on_axis(gamepad, index, value),
        };

        match result {
            Err(GamepadError::State(e)) => {
                warn!("Skipping {:?}: {}", event, e);
                Ok(false)
            }
            other => other,
        }
    }

    fn on_button<T: Transport>(
        &self,
        gamepad: &mut NsGamepad<T>,
        index: u8,
        pressed: bool,
    ) -> Result<bool, GamepadError> {
        let Some(target) = self.mapping.button(index) else {
            trace!("Joystick button {} has no mapping", index);
            return Ok(false);
        };

        if pressed {
            gamepad.press(target)?;
        } else {
            gamepad.release(target)?;
        }
        Ok(true)
    }

    fn on_axis<T: Transport>(
        &self,
        gamepad: &mut NsGamepad<T>,
        index: u8,
        value: i16,
    ) -> Result<bool, GamepadError> {
        let Some(binding) = self.mapping.axis(index) else {
            trace!("Joystick axis {} has no mapping", index);
            return Ok(false);
        };

        let raw = if binding.invert { value.saturating_neg() } else { value };

        match binding.target {
            AxisTarget::LeftX => gamepad.set_axis(StickAxis::LeftX, raw)?,
            AxisTarget::LeftY => gamepad.set_axis(StickAxis::LeftY, raw)?,
            AxisTarget::RightX => gamepad.set_axis(StickAxis::RightX, raw)?,
            AxisTarget::RightY => gamepad.set_axis(StickAxis::RightY, raw)?,
            AxisTarget::DpadX => gamepad.set_dpad_axis(DpadAxis::X, quantize_axis(raw) as i32)?,
            AxisTarget::DpadY => gamepad.set_dpad_axis(DpadAxis::Y, quantize_axis(raw) as i32)?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::config::{AxisMapping, ButtonMapping, ButtonTarget};
    use crate::nsgamepad::types::{DpadDirection, NsButton};
    use crate::transport::MockTransport;

    fn setup(mapping: Mapping) -> (MappingTranslator, NsGamepad<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let observer = transport.clone();
        let gamepad = NsGamepad::begin(transport).unwrap();
        (MappingTranslator::new(mapping), gamepad, observer)
    }

    fn button(index: u8, pressed: bool) -> InputEvent {
        InputEvent::Button { index, pressed, initial: false }
    }

    fn axis(index: u8, value: i16) -> InputEvent {
        InputEvent::Axis { index, value, initial: false }
    }

    #[test]
    fn default_axes_drive_sticks() {
        let (translator, mut gamepad, _) = setup(Mapping::default());

        assert!(translator.apply(&mut gamepad, &axis(0, -32767)).unwrap());
        assert!(translator.apply(&mut gamepad, &axis(1, 32767)).unwrap());
        assert!(translator.apply(&mut gamepad, &axis(2, 0)).unwrap());
        assert!(translator.apply(&mut gamepad, &axis(3, 256)).unwrap());

        let state = gamepad.state();
        assert_eq!(state.left_stick_x, 0);
        assert_eq!(state.left_stick_y, 255);
        assert_eq!(state.right_stick_x, 128);
        assert_eq!(state.right_stick_y, 128);
    }

    #[test]
    fn default_axes_drive_dpad() {
        let (translator, mut gamepad, observer) = setup(Mapping::default());

        translator.apply(&mut gamepad, &axis(4, 32767)).unwrap();
        assert_eq!(gamepad.state().dpad, DpadDirection::Right);

        translator.apply(&mut gamepad, &axis(5, -32767)).unwrap();
        assert_eq!(gamepad.state().dpad, DpadDirection::UpRight);

        translator.apply(&mut gamepad, &axis(4, 0)).unwrap();
        translator.apply(&mut gamepad, &axis(5, 0)).unwrap();
        assert_eq!(gamepad.state().dpad, DpadDirection::Centered);
        assert_eq!(observer.last_frame().unwrap()[5], 0x0F);
    }

    #[test]
    fn initial_events_are_applied() {
        let (translator, mut gamepad, _) = setup(Mapping::default());
        let event = InputEvent::Button { index: 3, pressed: true, initial: true };
        assert!(translator.apply(&mut gamepad, &event).unwrap());
        assert!(gamepad.state().buttons.is_pressed(3));
    }

    #[test]
    fn unmapped_events_send_nothing() {
        let (translator, mut gamepad, observer) = setup(Mapping::default());

        assert!(!translator.apply(&mut gamepad, &axis(6, 1000)).unwrap());
        assert!(!translator.apply(&mut gamepad, &button(20, true)).unwrap());
        assert_eq!(observer.frame_count(), 1);
    }

    #[test]
    fn button_override_and_inverted_axis() {
        let mapping = Mapping {
            axes: vec![AxisMapping { index: 1, target: AxisTarget::LeftY, invert: true }],
            buttons: vec![ButtonMapping { index: 0, target: ButtonTarget::Named(NsButton::B) }],
            passthrough_buttons: false,
        };
        let (translator, mut gamepad, _) = setup(mapping);

        translator.apply(&mut gamepad, &button(0, true)).unwrap();
        assert!(gamepad.state().buttons.is_pressed(NsButton::B.index()));
        assert!(!gamepad.state().buttons.is_pressed(0));

        translator.apply(&mut gamepad, &axis(1, i16::MIN)).unwrap();
        assert_eq!(gamepad.state().left_stick_y, 255);
    }

    #[test]
    fn rejected_button_is_skipped() {
        let mapping = Mapping {
            buttons: vec![ButtonMapping { index: 0, target: ButtonTarget::Index(14) }],
            ..Mapping::default()
        };
        let (translator, mut gamepad, observer) = setup(mapping);

        assert!(!translator.apply(&mut gamepad, &button(0, true)).unwrap());
        assert_eq!(observer.frame_count(), 1);
    }

    #[test]
    fn transport_failure_is_an_error() {
        let translator = MappingTranslator::default();
        // A gamepad whose transport fails after begin: close it behind its back.
        let transport = MockTransport::new();
        let mut handle = transport.clone();
        let mut gamepad = NsGamepad::begin(transport).unwrap();
        handle.close().unwrap();

        assert!(matches!(
            translator.apply(&mut gamepad, &button(0, true)),
            Err(GamepadError::Transport(_))
        ));
    }
}
