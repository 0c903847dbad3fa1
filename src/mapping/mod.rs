//! Mapping module - converts joystick inputs to gamepad operations

pub mod config;
pub mod translator;

pub use config::{Config, ConfigError};
pub use translator::MappingTranslator;
