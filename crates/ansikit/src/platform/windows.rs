#![forbid(unsafe_code)]

//! Windows console raw mode through the console mode bitmasks.
//!
//! Enabling reads the input and output masks, clears line input, echo and
//! processed input, and turns on virtual-terminal input and output
//! processing. The original masks are returned inside the session and
//! re-applied on disable. Native failures surface as
//! [`TerminalError::Platform`].
//!
//! Console access goes through [`ConsoleApi`]; [`NativeConsole`] is the real
//! implementation and only works on Windows hosts.

use std::io;

use crate::error::{Result, TerminalError};
use crate::geometry::ViewportSize;

use super::{PlatformKind, RawModeControl, RawModeSession, SessionLatch};

/// `ENABLE_PROCESSED_INPUT`
pub const ENABLE_PROCESSED_INPUT: u32 = 0x0001;
/// `ENABLE_LINE_INPUT`
pub const ENABLE_LINE_INPUT: u32 = 0x0002;
/// `ENABLE_ECHO_INPUT`
pub const ENABLE_ECHO_INPUT: u32 = 0x0004;
/// `ENABLE_VIRTUAL_TERMINAL_INPUT`
pub const ENABLE_VIRTUAL_TERMINAL_INPUT: u32 = 0x0200;
/// `ENABLE_VIRTUAL_TERMINAL_PROCESSING` (output mask)
pub const ENABLE_VIRTUAL_TERMINAL_PROCESSING: u32 = 0x0004;

const COOKED_INPUT_BITS: u32 = ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT | ENABLE_PROCESSED_INPUT;

/// Input mask with line buffering, echo and Ctrl-C processing removed.
#[must_use]
pub const fn raw_input_mode(mode: u32) -> u32 {
    (mode & !COOKED_INPUT_BITS) | ENABLE_VIRTUAL_TERMINAL_INPUT
}

/// Output mask with escape-sequence processing turned on.
#[must_use]
pub const fn vt_output_mode(mode: u32) -> u32 {
    mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING
}

/// Input mask for ordinary line-buffered, echoing input.
#[must_use]
pub const fn cooked_input_mode(mode: u32) -> u32 {
    (mode | COOKED_INPUT_BITS) & !ENABLE_VIRTUAL_TERMINAL_INPUT
}

/// Console modes captured before raw mode was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleModes {
    pub input: u32,
    pub output: u32,
}

/// Native console calls used by [`WindowsBackend`].
pub trait ConsoleApi {
    fn input_mode(&self) -> io::Result<u32>;
    fn set_input_mode(&self, mode: u32) -> io::Result<()>;
    fn output_mode(&self) -> io::Result<u32>;
    fn set_output_mode(&self, mode: u32) -> io::Result<()>;
    /// Visible window of the active screen buffer.
    fn window_size(&self) -> io::Result<ViewportSize>;
}

/// The process's real console.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeConsole;

#[cfg(windows)]
impl NativeConsole {
    fn mode_of(handle: crossterm_winapi::HandleType) -> io::Result<crossterm_winapi::ConsoleMode> {
        crossterm_winapi::Handle::new(handle).map(crossterm_winapi::ConsoleMode::from)
    }
}

#[cfg(windows)]
impl ConsoleApi for NativeConsole {
    fn input_mode(&self) -> io::Result<u32> {
        Self::mode_of(crossterm_winapi::HandleType::CurrentInputHandle)?.mode()
    }

    fn set_input_mode(&self, mode: u32) -> io::Result<()> {
        Self::mode_of(crossterm_winapi::HandleType::CurrentInputHandle)?.set_mode(mode)
    }

    fn output_mode(&self) -> io::Result<u32> {
        Self::mode_of(crossterm_winapi::HandleType::CurrentOutputHandle)?.mode()
    }

    fn set_output_mode(&self, mode: u32) -> io::Result<()> {
        Self::mode_of(crossterm_winapi::HandleType::CurrentOutputHandle)?.set_mode(mode)
    }

    fn window_size(&self) -> io::Result<ViewportSize> {
        let info = crossterm_winapi::ScreenBuffer::current()?.info()?;
        // terminal_size() reports right-left and bottom-top, both inclusive.
        let size = info.terminal_size();
        let width = u16::try_from(i32::from(size.width) + 1).unwrap_or(0);
        let height = u16::try_from(i32::from(size.height) + 1).unwrap_or(0);
        Ok(ViewportSize::new(width, height))
    }
}

#[cfg(not(windows))]
fn no_console() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "Windows console API is not available on this platform",
    )
}

#[cfg(not(windows))]
impl ConsoleApi for NativeConsole {
    fn input_mode(&self) -> io::Result<u32> {
        Err(no_console())
    }

    fn set_input_mode(&self, _mode: u32) -> io::Result<()> {
        Err(no_console())
    }

    fn output_mode(&self) -> io::Result<u32> {
        Err(no_console())
    }

    fn set_output_mode(&self, _mode: u32) -> io::Result<()> {
        Err(no_console())
    }

    fn window_size(&self) -> io::Result<ViewportSize> {
        Err(no_console())
    }
}

/// Raw-mode backend for the Windows console.
#[derive(Debug)]
pub struct WindowsBackend<C = NativeConsole> {
    console: C,
    latch: SessionLatch,
}

impl<C: ConsoleApi> WindowsBackend<C> {
    pub fn new(console: C) -> Self {
        Self {
            console,
            latch: SessionLatch::default(),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    fn enter(&self) -> Result<ConsoleModes> {
        let input = self
            .console
            .input_mode()
            .map_err(|e| TerminalError::platform("GetConsoleMode(input)", e))?;
        let output = self
            .console
            .output_mode()
            .map_err(|e| TerminalError::platform("GetConsoleMode(output)", e))?;

        self.console
            .set_input_mode(raw_input_mode(input))
            .map_err(|e| TerminalError::platform("SetConsoleMode(input)", e))?;
        if let Err(e) = self.console.set_output_mode(vt_output_mode(output)) {
            // Leave the console as we found it.
            if let Err(rollback) = self.console.set_input_mode(input) {
                tracing::warn!(
                    input,
                    error = %rollback,
                    "could not restore console input mode after a failed enable"
                );
            }
            return Err(TerminalError::platform("SetConsoleMode(output)", e));
        }
        Ok(ConsoleModes { input, output })
    }
}

impl<C: ConsoleApi> RawModeControl for WindowsBackend<C> {
    type Saved = ConsoleModes;

    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn enable_raw_mode(&mut self) -> Result<RawModeSession<ConsoleModes>> {
        self.latch.acquire()?;
        match self.enter() {
            Ok(modes) => {
                tracing::info!(
                    input = modes.input,
                    output = modes.output,
                    "raw mode enabled"
                );
                Ok(RawModeSession::new(modes))
            }
            Err(err) => {
                self.latch.release();
                Err(err)
            }
        }
    }

    fn disable_raw_mode(&mut self, session: RawModeSession<ConsoleModes>) -> Result<()> {
        self.latch.release();
        let modes = session.into_saved();
        let input = self
            .console
            .set_input_mode(modes.input)
            .map_err(|e| TerminalError::platform("SetConsoleMode(input)", e));
        let output = self
            .console
            .set_output_mode(modes.output)
            .map_err(|e| TerminalError::platform("SetConsoleMode(output)", e));
        input.and(output)?;
        tracing::info!("raw mode disabled");
        Ok(())
    }

    fn restore_cooked(&mut self) -> Result<()> {
        let input = self
            .console
            .input_mode()
            .map_err(|e| TerminalError::platform("GetConsoleMode(input)", e))?;
        self.console
            .set_input_mode(cooked_input_mode(input))
            .map_err(|e| TerminalError::platform("SetConsoleMode(input)", e))
    }

    fn terminal_size(&self) -> Result<ViewportSize> {
        self.console
            .window_size()
            .map_err(|e| TerminalError::platform("GetConsoleScreenBufferInfo", e))
    }

    fn is_raw(&self) -> bool {
        self.latch.is_set()
    }
}
