//! High-level bridge manager
//!
//! This module runs the event loop that connects a joystick to the gadget:
//! poll one event, translate it, write the resulting frame. The loop runs on
//! a single worker thread that exclusively owns the controller state, the
//! event source and the transport.

use crate::joystick::{EventSource, JoystickError};
use crate::mapping::config::Config;
use crate::mapping::translator::MappingTranslator;
use crate::nsgamepad::gamepad::{GamepadError, NsGamepad};
use crate::transport::Transport;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Manager is already running")]
    AlreadyRunning,

    #[error("Failed to spawn bridge thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Gamepad(#[from] GamepadError),

    #[error("Input failed: {0}")]
    Input(#[from] JoystickError),
}

/// Lifecycle events reported by the bridge thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeStatus {
    Started,
    Stopped { frames_sent: u64 },
    Failed(String),
}

/// Run the bridge loop on the calling thread until `running` is cleared or
/// the source disconnects.
///
/// Returns the number of frames sent. A transport failure ends the loop
/// immediately and is returned as an error; nothing is retried.
pub fn run_blocking<S, T>(
    config: &Config,
    mut source: S,
    transport: T,
    running: &AtomicBool,
) -> Result<u64, BridgeError>
where
    S: EventSource,
    T: Transport,
{
    let translator = MappingTranslator::new(config.mapping.clone());
    let idle = Duration::from_millis(config.settings.poll_interval_ms);
    let mut gamepad = NsGamepad::begin(transport)?;

    while running.load(Ordering::SeqCst) {
        match source.poll_event() {
            Ok(Some(event)) => {
                translator.apply(&mut gamepad, &event)?;
            }
            Ok(None) => {
                if !idle.is_zero() {
                    thread::sleep(idle);
                }
            }
            Err(JoystickError::Disconnected) => {
                info!("Input device disconnected");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if config.settings.neutral_on_exit {
        gamepad.reset()?;
    }
    let frames_sent = gamepad.frames_sent();
    gamepad.end()?;
    Ok(frames_sent)
}

/// Manager owning the bridge thread
pub struct BridgeManager<S, T>
where
    S: EventSource + Send + 'static,
    T: Transport + Send + 'static,
{
    config: Config,
    /// Source and transport, moved into the worker on start
    parts: Option<(S, T)>,
    running: Arc<AtomicBool>,
    status_sender: Sender<BridgeStatus>,
    status_receiver: Receiver<BridgeStatus>,
    worker: Option<JoinHandle<()>>,
}

impl<S, T> BridgeManager<S, T>
where
    S: EventSource + Send + 'static,
    T: Transport + Send + 'static,
{
    pub fn new(config: Config, source: S, transport: T) -> Self {
        let (status_sender, status_receiver) = unbounded();
        Self {
            config,
            parts: Some((source, transport)),
            running: Arc::new(AtomicBool::new(false)),
            status_sender,
            status_receiver,
            worker: None,
        }
    }

    /// Start the bridge thread
    pub fn start(&mut self) -> Result<(), BridgeError> {
        let Some((source, transport)) = self.parts.take() else {
            return Err(BridgeError::AlreadyRunning);
        };

        self.running.store(true, Ordering::SeqCst);
        info!("Starting bridge...");

        let config = self.config.clone();
        let running = Arc::clone(&self.running);
        let status = self.status_sender.clone();

        let worker = thread::Builder::new()
            .name("bridge".to_string())
            .spawn(move || {
                let _ = status.send(BridgeStatus::Started);
                info!("Bridge thread started");

                let outcome = match run_blocking(&config, source, transport, &running) {
                    Ok(frames_sent) => {
                        info!("Bridge thread stopped after {} frames", frames_sent);
                        BridgeStatus::Stopped { frames_sent }
                    }
                    Err(e) => {
                        warn!("Bridge thread failed: {}", e);
                        BridgeStatus::Failed(e.to_string())
                    }
                };

                running.store(false, Ordering::SeqCst);
                let _ = status.send(outcome);
            });

        match worker {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(BridgeError::Spawn(e))
            }
        }
    }

    /// Ask the bridge thread to stop after the current event
    pub fn stop(&self) {
        debug!("Stop requested");
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Shared running flag, e.g. for a Ctrl+C handler
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Receiver for lifecycle events
    pub fn status_receiver(&self) -> &Receiver<BridgeStatus> {
        &self.status_receiver
    }

    /// Wait for the bridge thread to finish and return its final status
    pub fn wait(&mut self) -> Option<BridgeStatus> {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Bridge thread panicked");
                return Some(BridgeStatus::Failed("bridge thread panicked".to_string()));
            }
        }
        self.status_receiver.try_iter().last()
    }
}

impl<S, T> Drop for BridgeManager<S, T>
where
    S: EventSource + Send + 'static,
    T: Transport + Send + 'static,
{
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
