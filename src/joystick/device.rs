//! Joystick device node reader
//!
//! Opens `/dev/input/jsN` non-blocking and queries its name and control
//! counts the same way `jstest` does (JSIOCGNAME, JSIOCGAXES, JSIOCGBUTTONS).

use crate::joystick::event::{InputEvent, JsEvent, JS_EVENT_SIZE};
use crate::joystick::{EventSource, JoystickError};
use log::{debug, info};
use nix::fcntl::{FcntlArg, OFlag};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::os::unix::io::AsRawFd;
use std::path::Path;

const NAME_BUF_LEN: usize = 128;

nix::ioctl_read!(jsiocgaxes, b'j', 0x11, u8);
nix::ioctl_read!(jsiocgbuttons, b'j', 0x12, u8);
nix::ioctl_read_buf!(jsiocgname, b'j', 0x13, u8);

/// Device capabilities reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoystickInfo {
    pub name: String,
    pub axes: u8,
    pub buttons: u8,
}

pub struct JoystickDevice {
    file: File,
    info: JoystickInfo,
}

impl JoystickDevice {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, JoystickError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| JoystickError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let fd = file.as_raw_fd();
        nix::fcntl::fcntl(fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK))?;

        let info = Self::query_info(fd)?;
        info!("Opened joystick {}: {}", path.display(), info.name);
        info!("  num_axes = {}", info.axes);
        info!("  num_buttons = {}", info.buttons);

        Ok(Self { file, info })
    }

    fn query_info(fd: i32) -> Result<JoystickInfo, JoystickError> {
        let mut name = [0u8; NAME_BUF_LEN];
        let mut axes = 0u8;
        let mut buttons = 0u8;

        // SAFETY: fd is an open joystick node; every buffer outlives its call
        // and has the size encoded in the request.
        unsafe {
            jsiocgname(fd, &mut name)?;
            jsiocgaxes(fd, &mut axes)?;
            jsiocgbuttons(fd, &mut buttons)?;
        }

        let len = name.iter().position(|&b| b == 0).unwrap_or(name.len());
        Ok(JoystickInfo {
            name: String::from_utf8_lossy(&name[..len]).into_owned(),
            axes,
            buttons,
        })
    }

    pub fn info(&self) -> &JoystickInfo {
        &self.info
    }

    /// Read one raw event. `Ok(None)` when nothing complete is available.
    pub fn poll(&mut self) -> Result<Option<JsEvent>, JoystickError> {
        let mut buf = [0u8; JS_EVENT_SIZE];
        match self.file.read(&mut buf) {
            Ok(JS_EVENT_SIZE) => Ok(Some(JsEvent::parse(&buf))),
            Ok(n) => {
                debug!("Short joystick read ({} bytes), skipping", n);
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {
                Ok(None)
            }
            Err(e) if e.raw_os_error() == Some(nix::libc::ENODEV) => {
                Err(JoystickError::Disconnected)
            }
            Err(e) => Err(JoystickError::Io(e)),
        }
    }
}

impl EventSource for JoystickDevice {
    fn poll_event(&mut self) -> Result<Option<InputEvent>, JoystickError> {
        Ok(self.poll()?.and_then(|event| {
            if event.is_initial() {
                debug!("(initial) {:?}", event);
            }
            event.into_input()
        }))
    }
}
