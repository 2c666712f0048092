#![forbid(unsafe_code)]

//! POSIX raw mode via termios, or via `stty` for the historical behavior.
//!
//! Both strategies are best-effort: a failure to reach the terminal is logged
//! at `warn` and yields a session whose snapshot is
//! [`PosixSaved::Unavailable`], which disables as a no-op. The caller never
//! sees an error from enable or disable on this backend, only
//! [`TerminalError::RawModeActive`](crate::TerminalError::RawModeActive) from
//! the session latch.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::PosixStrategy;
use crate::error::Result;
use crate::geometry::ViewportSize;

use super::{PlatformKind, RawModeControl, RawModeSession, SessionLatch};

/// `stty` arguments that enter raw mode.
pub const STTY_RAW: &[&str] = &["raw", "-echo"];

/// `stty` arguments that return to cooked mode.
pub const STTY_COOKED: &[&str] = &["cooked", "echo"];

/// Terminal state captured when raw mode was entered.
#[derive(Debug)]
pub enum PosixSaved {
    /// Attributes read with `tcgetattr`, plus the descriptor they belong to.
    #[cfg(unix)]
    Termios {
        tty: File,
        original: nix::sys::termios::Termios,
    },
    /// `stty raw -echo` ran; disabling runs `stty cooked echo`.
    Stty,
    /// The terminal could not be reached; disabling does nothing.
    Unavailable,
}

/// Raw-mode backend for Linux and other POSIX terminals.
#[derive(Debug)]
pub struct PosixBackend {
    strategy: PosixStrategy,
    tty_path: PathBuf,
    latch: SessionLatch,
}

impl PosixBackend {
    #[must_use]
    pub fn new(strategy: PosixStrategy, tty_path: PathBuf) -> Self {
        Self {
            strategy,
            tty_path,
            latch: SessionLatch::default(),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> PosixStrategy {
        self.strategy
    }

    #[must_use]
    pub fn tty_path(&self) -> &Path {
        &self.tty_path
    }

    fn enter(&self) -> io::Result<PosixSaved> {
        match self.strategy {
            PosixStrategy::Termios => termios_enter(&self.tty_path),
            PosixStrategy::Stty => {
                run_stty(&self.tty_path, STTY_RAW)?;
                Ok(PosixSaved::Stty)
            }
        }
    }

    fn leave(&self, saved: PosixSaved) -> io::Result<()> {
        match saved {
            #[cfg(unix)]
            PosixSaved::Termios { tty, original } => {
                nix::sys::termios::tcsetattr(
                    &tty,
                    nix::sys::termios::SetArg::TCSAFLUSH,
                    &original,
                )
                .map_err(io::Error::from)
            }
            PosixSaved::Stty => run_stty(&self.tty_path, STTY_COOKED),
            PosixSaved::Unavailable => {
                tracing::debug!("raw-mode snapshot unavailable, nothing to restore");
                Ok(())
            }
        }
    }
}

impl RawModeControl for PosixBackend {
    type Saved = PosixSaved;

    fn kind(&self) -> PlatformKind {
        PlatformKind::Posix
    }

    fn enable_raw_mode(&mut self) -> Result<RawModeSession<PosixSaved>> {
        self.latch.acquire()?;
        let saved = match self.enter() {
            Ok(saved) => {
                tracing::info!(strategy = ?self.strategy, "raw mode enabled");
                saved
            }
            Err(err) => {
                tracing::warn!(
                    strategy = ?self.strategy,
                    tty = %self.tty_path.display(),
                    error = %err,
                    "could not enable raw mode; continuing in cooked mode"
                );
                PosixSaved::Unavailable
            }
        };
        Ok(RawModeSession::new(saved))
    }

    fn disable_raw_mode(&mut self, session: RawModeSession<PosixSaved>) -> Result<()> {
        self.latch.release();
        match self.leave(session.into_saved()) {
            Ok(()) => tracing::info!(strategy = ?self.strategy, "raw mode disabled"),
            Err(err) => tracing::warn!(
                strategy = ?self.strategy,
                error = %err,
                "could not restore terminal mode"
            ),
        }
        Ok(())
    }

    fn restore_cooked(&mut self) -> Result<()> {
        let outcome = match self.strategy {
            PosixStrategy::Termios => termios_cooked(&self.tty_path),
            PosixStrategy::Stty => run_stty(&self.tty_path, STTY_COOKED),
        };
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "could not restore cooked mode");
        }
        Ok(())
    }

    fn terminal_size(&self) -> Result<ViewportSize> {
        Ok(window_size(&self.tty_path))
    }

    fn is_raw(&self) -> bool {
        self.latch.is_set()
    }
}

// ── termios ──────────────────────────────────────────────────────────────

#[cfg(unix)]
fn termios_enter(tty_path: &Path) -> io::Result<PosixSaved> {
    use nix::sys::termios::{SetArg, cfmakeraw, tcgetattr, tcsetattr};

    let tty = File::open(tty_path)?;
    let original = tcgetattr(&tty)?;
    let mut raw = original.clone();
    cfmakeraw(&mut raw);
    tcsetattr(&tty, SetArg::TCSAFLUSH, &raw)?;
    Ok(PosixSaved::Termios { tty, original })
}

#[cfg(not(unix))]
fn termios_enter(_tty_path: &Path) -> io::Result<PosixSaved> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "termios is not available on this platform",
    ))
}

/// Switch the line discipline back on without a snapshot.
#[cfg(unix)]
fn termios_cooked(tty_path: &Path) -> io::Result<()> {
    use nix::sys::termios::{
        InputFlags, LocalFlags, OutputFlags, SetArg, tcgetattr, tcsetattr,
    };

    let tty = File::open(tty_path)?;
    let mut attrs = tcgetattr(&tty)?;
    attrs.input_flags |= InputFlags::BRKINT | InputFlags::ICRNL | InputFlags::IXON;
    attrs.output_flags |= OutputFlags::OPOST | OutputFlags::ONLCR;
    attrs.local_flags |= LocalFlags::ICANON
        | LocalFlags::ECHO
        | LocalFlags::ECHOE
        | LocalFlags::ECHOK
        | LocalFlags::ISIG
        | LocalFlags::IEXTEN;
    tcsetattr(&tty, SetArg::TCSAFLUSH, &attrs)?;
    Ok(())
}

#[cfg(not(unix))]
fn termios_cooked(_tty_path: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "termios is not available on this platform",
    ))
}

#[cfg(unix)]
fn window_size(tty_path: &Path) -> ViewportSize {
    let tty = match File::open(tty_path) {
        Ok(tty) => tty,
        Err(err) => {
            tracing::debug!(tty = %tty_path.display(), error = %err, "cannot open tty for size");
            return ViewportSize::UNKNOWN;
        }
    };
    match rustix::termios::tcgetwinsize(&tty) {
        Ok(ws) if ws.ws_col > 0 && ws.ws_row > 0 => ViewportSize::new(ws.ws_col, ws.ws_row),
        Ok(_) => ViewportSize::UNKNOWN,
        Err(err) => {
            tracing::debug!(error = %err, "TIOCGWINSZ failed");
            ViewportSize::UNKNOWN
        }
    }
}

#[cfg(not(unix))]
fn window_size(_tty_path: &Path) -> ViewportSize {
    ViewportSize::UNKNOWN
}

// ── stty ─────────────────────────────────────────────────────────────────

/// Run `stty` with the terminal device as its stdin and wait for it.
///
/// A non-zero exit status is logged, not returned; only a failure to open
/// the device or spawn the command is an error.
fn run_stty(tty_path: &Path, args: &[&str]) -> io::Result<()> {
    let tty = File::open(tty_path)?;
    let status = Command::new("stty")
        .args(args)
        .stdin(Stdio::from(tty))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        tracing::warn!(?args, %status, "stty exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerminalError;

    const MISSING_TTY: &str = "/nonexistent/ansikit-tty";

    fn offline(strategy: PosixStrategy) -> PosixBackend {
        PosixBackend::new(strategy, PathBuf::from(MISSING_TTY))
    }

    #[test]
    fn unreachable_tty_yields_unavailable_session() {
        for strategy in [PosixStrategy::Termios, PosixStrategy::Stty] {
            let mut backend = offline(strategy);
            let session = backend.enable_raw_mode().unwrap();
            assert!(matches!(session.saved(), PosixSaved::Unavailable));
            assert!(backend.is_raw());
            backend.disable_raw_mode(session).unwrap();
            assert!(!backend.is_raw());
        }
    }

    #[test]
    fn nested_enable_is_rejected() {
        let mut backend = offline(PosixStrategy::Termios);
        let session = backend.enable_raw_mode().unwrap();
        assert!(matches!(
            backend.enable_raw_mode(),
            Err(TerminalError::RawModeActive)
        ));
        backend.disable_raw_mode(session).unwrap();
        let again = backend.enable_raw_mode().unwrap();
        backend.disable_raw_mode(again).unwrap();
    }

    #[test]
    fn restore_cooked_swallows_failures() {
        let mut backend = offline(PosixStrategy::Stty);
        assert!(backend.restore_cooked().is_ok());
        let mut backend = offline(PosixStrategy::Termios);
        assert!(backend.restore_cooked().is_ok());
        assert!(!backend.is_raw());
    }

    #[test]
    fn size_of_missing_tty_is_unknown() {
        let backend = offline(PosixStrategy::Termios);
        let first = backend.terminal_size().unwrap();
        let second = backend.terminal_size().unwrap();
        assert_eq!(first, ViewportSize::UNKNOWN);
        assert_eq!(first, second);
    }

    #[test]
    fn accessors() {
        let backend = offline(PosixStrategy::Stty);
        assert_eq!(backend.kind(), PlatformKind::Posix);
        assert_eq!(backend.strategy(), PosixStrategy::Stty);
        assert_eq!(backend.tty_path(), Path::new(MISSING_TTY));
    }
}
