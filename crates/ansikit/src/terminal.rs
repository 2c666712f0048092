#![forbid(unsafe_code)]

//! The terminal facade.
//!
//! [`Terminal`] owns one platform backend, the output stream and the input
//! byte source. Every operation writes its sequence and flushes before
//! returning; nothing is batched.
//!
//! # Example
//!
//! ```no_run
//! use ansikit::Terminal;
//!
//! let mut term = Terminal::new()?;
//! term.clear_screen()?;
//! term.print_at(3, 5, "hello")?;
//! let pos = term.cursor_position();
//! term.println(&format!("cursor is at {pos}"))?;
//! # Ok::<(), ansikit::TerminalError>(())
//! ```
//!
//! Raw mode is scoped with [`Terminal::raw_mode`]:
//!
//! ```no_run
//! # let mut term = ansikit::Terminal::new()?;
//! let mut raw = term.raw_mode()?;
//! let key = raw.read_key()?;
//! raw.finish()?;
//! # Ok::<(), ansikit::TerminalError>(())
//! ```

use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use ansikit_codes::cursor::{self, CursorShape};
use ansikit_codes::erase::{self, EraseDisplayMode, EraseLineMode};
use ansikit_codes::screen;
use ansikit_codes::sgr::SGR_RESET;

use crate::config::TerminalConfig;
use crate::cursor_query::{
    ByteSource, CursorReport, FallbackReason, StdinBytes, probe_viewport, query_cursor,
};
use crate::error::{Result, TerminalError};
use crate::geometry::{CursorPosition, ViewportSize};
use crate::platform::{PlatformBackend, RawModeControl, RawModeSession};
use crate::restore::write_restore_sequence;

/// High-level terminal operations over one platform backend.
#[derive(Debug)]
pub struct Terminal<B = PlatformBackend, W = Stdout, S = StdinBytes> {
    backend: B,
    out: W,
    input: S,
    config: TerminalConfig,
}

impl Terminal {
    /// Terminal for the running OS, configured from the environment.
    pub fn new() -> Result<Self> {
        Self::with_config(std::env::consts::OS, TerminalConfig::from_env())
    }

    /// Terminal for the named OS with default configuration.
    pub fn for_os(os: &str) -> Result<Self> {
        Self::with_config(os, TerminalConfig::default())
    }

    /// Terminal for the named OS on stdout/stdin.
    ///
    /// Fails with [`TerminalError::UnsupportedPlatform`] unless `os` names
    /// Windows or Linux.
    pub fn with_config(os: &str, config: TerminalConfig) -> Result<Self> {
        let backend = PlatformBackend::for_os(os, &config)?;
        tracing::info!(
            os,
            platform = %backend.kind(),
            reply_timeout = ?config.query.reply_timeout,
            "terminal created"
        );
        Ok(Self::from_parts(backend, io::stdout(), StdinBytes::new(), config))
    }
}

impl<B, W, S> Terminal<B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    /// Assemble a terminal from explicit parts.
    pub fn from_parts(backend: B, out: W, input: S, config: TerminalConfig) -> Self {
        Self {
            backend,
            out,
            input,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The output stream.
    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (B, W, S) {
        (self.backend, self.out, self.input)
    }

    // ── Raw output ───────────────────────────────────────────────────────

    /// Run a writer-style sequence helper against the output and flush.
    pub fn write_sequence<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        f(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Write raw bytes and flush.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_sequence(|w| w.write_all(bytes))
    }

    // ── Text ─────────────────────────────────────────────────────────────

    pub fn print(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Print `text` followed by CR LF, which also lands in column 1 while
    /// output post-processing is off in raw mode.
    pub fn println(&mut self, text: &str) -> Result<()> {
        self.write_sequence(|w| {
            w.write_all(text.as_bytes())?;
            w.write_all(b"\r\n")
        })
    }

    /// Move to (`row`, `col`), 1-based, and print `message` there.
    ///
    /// Coordinates are not checked against the viewport. An empty message is
    /// rejected before anything is written.
    pub fn print_at(&mut self, row: u16, col: u16, message: &str) -> Result<()> {
        if message.is_empty() {
            return Err(TerminalError::InvalidArgument("message must not be empty"));
        }
        self.write_sequence(|w| {
            cursor::cup(w, row, col)?;
            w.write_all(message.as_bytes())
        })
    }

    pub fn write_styled(&mut self, text: &crate::style::StyledText<'_>) -> Result<()> {
        text.write_to(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// SGR reset.
    pub fn reset_style(&mut self) -> Result<()> {
        self.write_bytes(SGR_RESET)
    }

    // ── Cursor ───────────────────────────────────────────────────────────

    pub fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        self.write_sequence(|w| cursor::cup(w, row, col))
    }

    pub fn home(&mut self) -> Result<()> {
        self.write_bytes(cursor::HOME)
    }

    pub fn move_up(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| cursor::cuu(w, n))
    }

    pub fn move_down(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| cursor::cud(w, n))
    }

    pub fn move_forward(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| cursor::cuf(w, n))
    }

    pub fn move_back(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| cursor::cub(w, n))
    }

    pub fn save_cursor(&mut self) -> Result<()> {
        self.write_bytes(cursor::SAVE)
    }

    pub fn restore_cursor(&mut self) -> Result<()> {
        self.write_bytes(cursor::RESTORE)
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.write_bytes(cursor::HIDE)
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        self.write_bytes(cursor::SHOW)
    }

    pub fn set_cursor_shape(&mut self, shape: CursorShape) -> Result<()> {
        self.write_sequence(|w| cursor::set_shape(w, shape))
    }

    // ── Erase ────────────────────────────────────────────────────────────

    /// Erase the whole display and home the cursor.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.write_sequence(|w| {
            erase::erase_display(w, EraseDisplayMode::All)?;
            w.write_all(cursor::HOME)
        })
    }

    pub fn erase_display(&mut self, mode: EraseDisplayMode) -> Result<()> {
        self.write_sequence(|w| erase::erase_display(w, mode))
    }

    pub fn erase_line(&mut self, mode: EraseLineMode) -> Result<()> {
        self.write_sequence(|w| erase::erase_line(w, mode))
    }

    // ── Scrolling ────────────────────────────────────────────────────────

    /// DECSTBM with 1-based inclusive `top` and `bottom`.
    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) -> Result<()> {
        self.write_sequence(|w| screen::set_scroll_region(w, top, bottom))
    }

    pub fn reset_scroll_region(&mut self) -> Result<()> {
        self.write_sequence(screen::reset_scroll_region)
    }

    pub fn scroll_up(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| screen::scroll_up(w, n))
    }

    pub fn scroll_down(&mut self, n: u16) -> Result<()> {
        self.write_sequence(|w| screen::scroll_down(w, n))
    }

    // ── Screen ───────────────────────────────────────────────────────────

    pub fn enter_alternate_buffer(&mut self) -> Result<()> {
        self.write_sequence(screen::alt_buffer_enter)
    }

    pub fn leave_alternate_buffer(&mut self) -> Result<()> {
        self.write_sequence(screen::alt_buffer_leave)
    }

    pub fn set_window_title(&mut self, title: &str) -> Result<()> {
        self.write_sequence(|w| screen::set_window_title(w, title))
    }

    /// Ask an xterm-compatible emulator to resize its window.
    pub fn resize_window(&mut self, rows: u16, cols: u16) -> Result<()> {
        self.write_sequence(|w| screen::resize_window(w, rows, cols))
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Current viewport size, read fresh on every call.
    ///
    /// The backend answers first. When it cannot tell (POSIX without a
    /// usable tty), the cursor is parked in the far corner and its position
    /// read back. [`ViewportSize::UNKNOWN`] if that fails too.
    pub fn viewport_size(&mut self) -> Result<ViewportSize> {
        let size = self.backend.terminal_size()?;
        if size.is_known() {
            return Ok(size);
        }
        tracing::debug!("backend size unknown, probing with the cursor");
        let probed =
            self.with_raw_input(|t| probe_viewport(&mut t.out, &mut t.input, &t.config.query));
        match probed {
            Ok(size) => Ok(size.unwrap_or(ViewportSize::UNKNOWN)),
            Err(err) => {
                tracing::warn!(error = %err, "cannot enter raw mode for viewport probe");
                Ok(ViewportSize::UNKNOWN)
            }
        }
    }

    /// Cursor position, (1,1) when the query fails.
    pub fn cursor_position(&mut self) -> CursorPosition {
        self.query_cursor_position().position()
    }

    /// Cursor position query that tells a real answer from a fallback.
    ///
    /// Raw mode is entered for the exchange and left afterwards. Inside an
    /// existing [`RawMode`] scope the current session is reused.
    pub fn query_cursor_position(&mut self) -> CursorReport {
        match self.with_raw_input(|t| query_cursor(&mut t.out, &mut t.input, &t.config.query)) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "cannot enter raw mode for cursor query");
                CursorReport::Fallback(FallbackReason::Io(err.io_kind()))
            }
        }
    }

    /// Run `f` with raw input, restoring the previous mode afterwards.
    ///
    /// An already-open session counts as raw. Any other enable failure is
    /// returned without running `f`, since the reply would otherwise be held
    /// back until Enter.
    fn with_raw_input<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Result<T> {
        match self.backend.enable_raw_mode() {
            Ok(session) => {
                let value = f(&mut *self);
                if let Err(err) = self.backend.disable_raw_mode(session) {
                    tracing::warn!(error = %err, "could not leave raw mode after query");
                }
                Ok(value)
            }
            Err(TerminalError::RawModeActive) => Ok(f(&mut *self)),
            Err(err) => Err(err),
        }
    }

    // ── Raw mode and input ───────────────────────────────────────────────

    /// Enter raw mode until the returned guard is dropped or finished.
    pub fn raw_mode(&mut self) -> Result<RawMode<'_, B, W, S>> {
        let session = self.backend.enable_raw_mode()?;
        Ok(RawMode {
            terminal: self,
            session: Some(session),
        })
    }

    /// Block until one input byte arrives.
    pub fn read_key(&mut self) -> Result<u8> {
        loop {
            if let Some(byte) = self.input.next_byte(None)? {
                return Ok(byte);
            }
        }
    }

    /// Read one line of cooked input without the line ending.
    ///
    /// `None` at end of input. Bytes are decoded lossily as UTF-8.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = Vec::new();
        loop {
            match self.input.next_byte(None) {
                Ok(Some(b'\n')) => break,
                Ok(Some(byte)) => line.push(byte),
                Ok(None) => continue,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    if line.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// One input byte, or `None` if nothing arrived within `timeout`.
    pub fn poll_key(&mut self, timeout: Duration) -> Result<Option<u8>> {
        Ok(self.input.next_byte(Some(timeout))?)
    }

    /// Best-effort exit restoration: reset style, reset margins, show the
    /// cursor, leave the alternate buffer, back to cooked mode.
    ///
    /// Every step runs; the first failure is returned.
    pub fn restore(&mut self) -> Result<()> {
        let written = write_restore_sequence(&mut self.out).map_err(TerminalError::from);
        let cooked = self.backend.restore_cooked();
        written.and(cooked)
    }
}

/// Raw-mode scope over a [`Terminal`]. Leaves raw mode when dropped.
///
/// Dereferences to the terminal, so every terminal operation is available
/// while raw.
pub struct RawMode<'a, B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    terminal: &'a mut Terminal<B, W, S>,
    session: Option<RawModeSession<B::Saved>>,
}

impl<B, W, S> RawMode<'_, B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    /// Leave raw mode now and report whether the restore worked.
    pub fn finish(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => self.terminal.backend.disable_raw_mode(session),
            None => Ok(()),
        }
    }
}

impl<B, W, S> Deref for RawMode<'_, B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    type Target = Terminal<B, W, S>;

    fn deref(&self) -> &Self::Target {
        self.terminal
    }
}

impl<B, W, S> DerefMut for RawMode<'_, B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.terminal
    }
}

impl<B, W, S> Drop for RawMode<'_, B, W, S>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(error = %err, "could not leave raw mode");
        }
    }
}
