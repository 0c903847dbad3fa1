//! Configuration loader and validator
//!
//! Loads bridge settings and the joystick-to-gamepad mapping from TOML files
//! in the configs/ directory.

use crate::nsgamepad::constants::{
    BUTTON_COUNT, DEFAULT_BAUD_RATE, DEFAULT_JOYSTICK_DEVICE, DEFAULT_SERIAL_PORT,
};
use crate::nsgamepad::types::NsButton;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Path of the configuration loaded by [`Config::load_default`]
pub const DEFAULT_CONFIG_PATH: &str = "configs/default.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Device and transport settings
    #[serde(default)]
    pub settings: Settings,

    /// Joystick to gamepad mapping
    #[serde(default)]
    pub mapping: Mapping,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Joystick device node
    #[serde(default = "default_device")]
    pub device: String,

    /// Serial port wired to the gadget
    #[serde(default = "default_serial_port")]
    pub serial_port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Sleep between polls when no event is pending
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Send one neutral frame before closing the transport
    #[serde(default = "default_true")]
    pub neutral_on_exit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: default_device(),
            serial_port: default_serial_port(),
            baud_rate: default_baud_rate(),
            poll_interval_ms: default_poll_interval_ms(),
            neutral_on_exit: true,
        }
    }
}

fn default_device() -> String { DEFAULT_JOYSTICK_DEVICE.to_string() }
fn default_serial_port() -> String { DEFAULT_SERIAL_PORT.to_string() }
fn default_baud_rate() -> u32 { DEFAULT_BAUD_RATE }
fn default_poll_interval_ms() -> u64 { 1 }
fn default_true() -> bool { true }

/// Where a joystick axis ends up on the gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTarget {
    LeftX,
    LeftY,
    RightX,
    RightY,
    DpadX,
    DpadY,
}

/// One joystick axis binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    /// Joystick axis number
    pub index: u8,

    pub target: AxisTarget,

    /// Flip the axis direction before quantizing
    #[serde(default)]
    pub invert: bool,
}

/// A gamepad button, by name (`"A"`) or by bit index (`2`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonTarget {
    Index(u8),
    Named(NsButton),
}

impl ButtonTarget {
    pub fn index(self) -> u8 {
        match self {
            ButtonTarget::Index(index) => index,
            ButtonTarget::Named(button) => button.index(),
        }
    }
}

/// One joystick button binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMapping {
    /// Joystick button number
    pub index: u8,

    pub target: ButtonTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    #[serde(default = "default_axes")]
    pub axes: Vec<AxisMapping>,

    /// Button overrides; buttons not listed here follow `passthrough_buttons`
    #[serde(default)]
    pub buttons: Vec<ButtonMapping>,

    /// Forward unlisted joystick buttons 0..=13 to the same gamepad button
    #[serde(default = "default_true")]
    pub passthrough_buttons: bool,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            axes: default_axes(),
            buttons: Vec::new(),
            passthrough_buttons: true,
        }
    }
}

/// Axes 0,1 left stick; 2,3 right stick; 4,5 dpad
fn default_axes() -> Vec<AxisMapping> {
    [
        AxisTarget::LeftX,
        AxisTarget::LeftY,
        AxisTarget::RightX,
        AxisTarget::RightY,
        AxisTarget::DpadX,
        AxisTarget::DpadY,
    ]
    .into_iter()
    .enumerate()
    .map(|(index, target)| AxisMapping {
        index: index as u8,
        target,
        invert: false,
    })
    .collect()
}

impl Mapping {
    /// Binding for a joystick axis, if any
    pub fn axis(&self, index: u8) -> Option<&AxisMapping> {
        self.axes.iter().find(|m| m.index == index)
    }

    /// Gamepad button index for a joystick button, if any
    pub fn button(&self, index: u8) -> Option<u8> {
        match self.buttons.iter().find(|m| m.index == index) {
            Some(mapping) => Some(mapping.target.index()),
            None if self.passthrough_buttons && index < BUTTON_COUNT => Some(index),
            None => None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading configuration from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        let config = Self::from_toml(&content)?;
        info!("✓ Config validation passed");
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        debug!("  - Device: {}", config.settings.device);
        debug!("  - Serial: {} @ {}", config.settings.serial_port, config.settings.baud_rate);
        debug!("  - Axis bindings: {}", config.mapping.axes.len());
        debug!("  - Button overrides: {}", config.mapping.buttons.len());

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.device.is_empty() {
            return Err(ConfigError::Invalid("settings.device must not be empty".to_string()));
        }
        if self.settings.serial_port.is_empty() {
            return Err(ConfigError::Invalid("settings.serial_port must not be empty".to_string()));
        }
        if self.settings.baud_rate == 0 {
            return Err(ConfigError::Invalid("settings.baud_rate must be greater than 0".to_string()));
        }

        self.validate_axes()?;
        self.validate_buttons()?;
        Ok(())
    }

    fn validate_axes(&self) -> Result<(), ConfigError> {
        let mut indices = HashSet::new();
        let mut targets = HashSet::new();

        for mapping in &self.mapping.axes {
            if !indices.insert(mapping.index) {
                return Err(ConfigError::Invalid(format!(
                    "Axis {} is mapped more than once",
                    mapping.index
                )));
            }
            if !targets.insert(mapping.target) {
                return Err(ConfigError::Invalid(format!(
                    "Axis target {:?} is used by more than one axis",
                    mapping.target
                )));
            }
        }
        Ok(())
    }

    fn validate_buttons(&self) -> Result<(), ConfigError> {
        let mut indices = HashSet::new();

        for mapping in &self.mapping.buttons {
            if !indices.insert(mapping.index) {
                return Err(ConfigError::Invalid(format!(
                    "Button {} is mapped more than once",
                    mapping.index
                )));
            }
            let target = mapping.target.index();
            if target >= BUTTON_COUNT {
                return Err(ConfigError::Invalid(format!(
                    "Button {} targets gamepad button {} (valid: 0..={})",
                    mapping.index,
                    target,
                    BUTTON_COUNT - 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.device, "/dev/input/js0");
        assert_eq!(settings.serial_port, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, 921_600);
        assert_eq!(settings.poll_interval_ms, 1);
        assert!(settings.neutral_on_exit);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mapping.axes.len(), 6);
        assert_eq!(config.mapping.axis(4).unwrap().target, AxisTarget::DpadX);
        assert_eq!(config.mapping.axis(6), None);
    }

    #[test]
    fn test_button_passthrough() {
        let mapping = Mapping::default();
        assert_eq!(mapping.button(0), Some(0));
        assert_eq!(mapping.button(13), Some(13));
        assert_eq!(mapping.button(14), None);
    }

    #[test]
    fn test_button_overrides_by_name_and_index() {
        let config = Config::from_toml(
            r#"
            [mapping]
            passthrough_buttons = false

            [[mapping.buttons]]
            index = 0
            target = "A"

            [[mapping.buttons]]
            index = 15
            target = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.mapping.button(0), Some(NsButton::A.index()));
        assert_eq!(config.mapping.button(15), Some(12));
        assert_eq!(config.mapping.button(1), None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [settings]
            device = "/dev/input/js1"
            serial_port = "/dev/ttyAMA0"
            baud_rate = 115200

            [[mapping.axes]]
            index = 0
            target = "left_x"

            [[mapping.axes]]
            index = 1
            target = "left_y"
            invert = true
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.device, "/dev/input/js1");
        assert_eq!(config.settings.baud_rate, 115_200);
        assert_eq!(config.settings.poll_interval_ms, 1);
        assert_eq!(config.mapping.axes.len(), 2);
        assert!(config.mapping.axis(1).unwrap().invert);
        assert_eq!(config.mapping.axis(2), None);
    }

    #[test]
    fn test_invalid_baud_rate() {
        let result = Config::from_toml("[settings]\nbaud_rate = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_axis_target() {
        let mut config = Config::default();
        config.mapping.axes.push(AxisMapping {
            index: 7,
            target: AxisTarget::LeftX,
            invert: false,
        });
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("LeftX"));
    }

    #[test]
    fn test_duplicate_axis_index() {
        let mut config = Config::default();
        config.mapping.axes = vec![
            AxisMapping { index: 0, target: AxisTarget::LeftX, invert: false },
            AxisMapping { index: 0, target: AxisTarget::LeftY, invert: false },
        ];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_button_target_out_of_range() {
        let mut config = Config::default();
        config.mapping.buttons.push(ButtonMapping {
            index: 0,
            target: ButtonTarget::Index(14),
        });
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("0..=13"));
    }

    #[test]
    fn test_unknown_button_name() {
        let result = Config::from_toml(
            r#"
            [[mapping.buttons]]
            index = 0
            target = "Turbo"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Config::from_toml("[settings"), Err(ConfigError::Parse(_))));
    }
}
