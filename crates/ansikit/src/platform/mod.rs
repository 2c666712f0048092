#![forbid(unsafe_code)]

//! Raw-mode control and viewport size, one backend per operating system.
//!
//! The backend is picked once from an OS name (see [`PlatformKind::from_os_name`])
//! and then owned by the [`crate::Terminal`]. Both backends share the
//! [`RawModeControl`] contract:
//!
//! | Operation | POSIX | Windows |
//! |-----------|-------|---------|
//! | enable | termios `cfmakeraw` or `stty raw -echo`, failures logged | console mode masks, failures returned |
//! | disable | restore snapshot or `stty cooked echo` | re-apply saved masks |
//! | size | `TIOCGWINSZ` on the tty | visible window of the screen buffer |
//!
//! Only one raw-mode session may be open per backend. A second enable before
//! the matching disable fails with [`TerminalError::RawModeActive`].

use std::fmt;

use crate::config::TerminalConfig;
use crate::error::{Result, TerminalError};
use crate::geometry::ViewportSize;

pub mod posix;
pub mod windows;

pub use posix::{PosixBackend, PosixSaved};
pub use windows::{ConsoleApi, ConsoleModes, NativeConsole, WindowsBackend};

// ── Platform selection ───────────────────────────────────────────────────

/// Which backend family a terminal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Posix,
    Windows,
}

impl PlatformKind {
    /// Map an OS identifier to a backend.
    ///
    /// The name is lower-cased; anything containing `windows` selects the
    /// Windows backend, anything containing `linux` selects POSIX. Every
    /// other name is rejected.
    pub fn from_os_name(name: &str) -> Result<Self> {
        let lowered = name.to_ascii_lowercase();
        if lowered.contains("windows") {
            Ok(Self::Windows)
        } else if lowered.contains("linux") {
            Ok(Self::Posix)
        } else {
            Err(TerminalError::UnsupportedPlatform(name.to_string()))
        }
    }

    /// Backend for the OS this binary was compiled for.
    pub fn current() -> Result<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Sessions ─────────────────────────────────────────────────────────────

/// Proof that raw mode was entered, carrying the pre-raw terminal state.
///
/// Hand it back to [`RawModeControl::disable_raw_mode`] to restore that
/// state. The value is not `Clone`, so each session is restored at most once.
#[derive(Debug)]
#[must_use = "a raw-mode session must be passed back to disable_raw_mode"]
pub struct RawModeSession<S> {
    saved: S,
}

impl<S> RawModeSession<S> {
    /// Wrap a snapshot. Backends call this from `enable_raw_mode`.
    pub fn new(saved: S) -> Self {
        Self { saved }
    }

    /// The captured pre-raw state.
    pub fn saved(&self) -> &S {
        &self.saved
    }

    /// Give up the snapshot. Backends call this from `disable_raw_mode`.
    pub fn into_saved(self) -> S {
        self.saved
    }

    pub(crate) fn map<T>(self, f: impl FnOnce(S) -> T) -> RawModeSession<T> {
        RawModeSession::new(f(self.saved))
    }
}

/// Single-session bookkeeping shared by the backends.
#[derive(Debug, Default)]
pub(crate) struct SessionLatch {
    active: bool,
}

impl SessionLatch {
    /// Claim the latch, failing if a session is already open.
    pub(crate) fn acquire(&mut self) -> Result<()> {
        if self.active {
            return Err(TerminalError::RawModeActive);
        }
        self.active = true;
        Ok(())
    }

    pub(crate) fn release(&mut self) {
        self.active = false;
    }

    pub(crate) fn is_set(&self) -> bool {
        self.active
    }
}

// ── Contract ─────────────────────────────────────────────────────────────

/// Raw-mode toggling and size queries for one platform.
pub trait RawModeControl {
    /// Terminal state captured on enable and consumed on disable.
    type Saved;

    /// The backend family.
    fn kind(&self) -> PlatformKind;

    /// Deliver input immediately and stop echoing it.
    fn enable_raw_mode(&mut self) -> Result<RawModeSession<Self::Saved>>;

    /// Restore the state captured by the matching enable.
    ///
    /// The session latch is released even if the restore itself fails.
    fn disable_raw_mode(&mut self, session: RawModeSession<Self::Saved>) -> Result<()>;

    /// Put the terminal back into line-buffered, echoing mode without a
    /// session. Used on the way out of the process.
    fn restore_cooked(&mut self) -> Result<()>;

    /// Current viewport size, or [`ViewportSize::UNKNOWN`] when the
    /// platform cannot tell.
    fn terminal_size(&self) -> Result<ViewportSize>;

    /// Whether a session is currently open.
    fn is_raw(&self) -> bool;
}

// ── OS dispatch ──────────────────────────────────────────────────────────

/// The backend chosen at construction time.
#[derive(Debug)]
pub enum PlatformBackend {
    Posix(PosixBackend),
    Windows(WindowsBackend<NativeConsole>),
}

/// Saved state of whichever backend opened the session.
#[derive(Debug)]
pub enum PlatformSaved {
    Posix(PosixSaved),
    Windows(ConsoleModes),
}

impl PlatformBackend {
    /// Instantiate the backend for `kind`.
    #[must_use]
    pub fn for_kind(kind: PlatformKind, config: &TerminalConfig) -> Self {
        tracing::debug!(platform = %kind, "selected terminal backend");
        match kind {
            PlatformKind::Posix => Self::Posix(PosixBackend::new(
                config.posix_strategy,
                config.tty_path.clone(),
            )),
            PlatformKind::Windows => Self::Windows(WindowsBackend::new(NativeConsole)),
        }
    }

    /// Select and instantiate the backend for an OS name.
    pub fn for_os(name: &str, config: &TerminalConfig) -> Result<Self> {
        PlatformKind::from_os_name(name).map(|kind| Self::for_kind(kind, config))
    }
}

impl RawModeControl for PlatformBackend {
    type Saved = PlatformSaved;

    fn kind(&self) -> PlatformKind {
        match self {
            Self::Posix(_) => PlatformKind::Posix,
            Self::Windows(_) => PlatformKind::Windows,
        }
    }

    fn enable_raw_mode(&mut self) -> Result<RawModeSession<PlatformSaved>> {
        match self {
            Self::Posix(b) => Ok(b.enable_raw_mode()?.map(PlatformSaved::Posix)),
            Self::Windows(b) => Ok(b.enable_raw_mode()?.map(PlatformSaved::Windows)),
        }
    }

    fn disable_raw_mode(&mut self, session: RawModeSession<PlatformSaved>) -> Result<()> {
        match (self, session.into_saved()) {
            (Self::Posix(b), PlatformSaved::Posix(saved)) => {
                b.disable_raw_mode(RawModeSession::new(saved))
            }
            (Self::Windows(b), PlatformSaved::Windows(saved)) => {
                b.disable_raw_mode(RawModeSession::new(saved))
            }
            _ => Err(TerminalError::InvalidArgument(
                "raw-mode session belongs to a different backend",
            )),
        }
    }

    fn restore_cooked(&mut self) -> Result<()> {
        match self {
            Self::Posix(b) => b.restore_cooked(),
            Self::Windows(b) => b.restore_cooked(),
        }
    }

    fn terminal_size(&self) -> Result<ViewportSize> {
        match self {
            Self::Posix(b) => b.terminal_size(),
            Self::Windows(b) => b.terminal_size(),
        }
    }

    fn is_raw(&self) -> bool {
        match self {
            Self::Posix(b) => b.is_raw(),
            Self::Windows(b) => b.is_raw(),
        }
    }
}
