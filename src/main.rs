//! NSGadget bridge - Main Application
//!
//! Reads a Linux joystick and forwards every input change to the NSGadget
//! over the serial port named in the configuration.
//!
//! Usage: `nsgamepad-bridge [CONFIG]` (defaults to `configs/default.toml`)

use anyhow::Context;
use log::{info, warn};
use nsgamepad_rs::mapping::config::{Config, DEFAULT_CONFIG_PATH};
use nsgamepad_rs::{BridgeManager, BridgeStatus, JoystickDevice, SerialTransport};
use std::path::Path;
use std::sync::atomic::Ordering;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== NSGadget Bridge ===");
    println!("Press Ctrl+C to stop");
    println!();

    let config_path = std::env::args().nth(1);
    let config = match config_path.as_deref() {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load_default()
            .with_context(|| format!("loading {}", DEFAULT_CONFIG_PATH))?,
        None => {
            warn!("{} not found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Config::default()
        }
    };
    info!(
        "✓ Configuration: {} -> {} @ {} baud",
        config.settings.device, config.settings.serial_port, config.settings.baud_rate
    );

    let joystick = JoystickDevice::open(&config.settings.device)
        .with_context(|| format!("opening joystick {}", config.settings.device))?;
    let transport = SerialTransport::open(&config.settings.serial_port, config.settings.baud_rate)
        .with_context(|| format!("opening serial port {}", config.settings.serial_port))?;

    let mut manager = BridgeManager::new(config, joystick, transport);

    let running = manager.running_flag();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received, stopping...");
        running.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl+C handler")?;

    manager.start()?;
    info!("✓ Bridge started, waiting for joystick events...");

    match manager.wait() {
        Some(BridgeStatus::Stopped { frames_sent }) => {
            info!("✓ Bridge stopped after {} frames", frames_sent);
            Ok(())
        }
        Some(BridgeStatus::Failed(reason)) => anyhow::bail!("bridge failed: {}", reason),
        _ => Ok(()),
    }
}
